use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common_dto::ApiResponse;
use crate::dto::schedule_dto::{CreateScheduleRequest, ScheduleResponse};
use crate::repositories::schedule_repository::ScheduleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::{parse_date, parse_time, validate_time_window};

pub struct ScheduleController {
    repository: ScheduleRepository,
}

impl ScheduleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ScheduleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateScheduleRequest,
    ) -> Result<ApiResponse<ScheduleResponse>, AppError> {
        // un horario pertenece a una categoría de tour o a un chofer, nunca
        // a ambos ni a ninguno
        match (request.category_id, request.driver_id) {
            (Some(_), Some(_)) | (None, None) => {
                return Err(AppError::BadRequest(
                    "El horario debe pertenecer a una categoría o a un chofer".to_string(),
                ));
            }
            _ => {}
        }

        let start_time = parse_time(&request.start_time)?;
        let end_time = parse_time(&request.end_time)?;
        validate_time_window(start_time, end_time)?;

        let days = [
            request.monday,
            request.tuesday,
            request.wednesday,
            request.thursday,
            request.friday,
            request.saturday,
            request.sunday,
        ];
        if !days.iter().any(|d| *d) {
            return Err(AppError::BadRequest(
                "El horario debe marcar al menos un día de la semana".to_string(),
            ));
        }

        let active_from = request.active_from.as_deref().map(parse_date).transpose()?;
        let active_until = request
            .active_until
            .as_deref()
            .map(parse_date)
            .transpose()?;
        if let (Some(from), Some(until)) = (active_from, active_until) {
            if until < from {
                return Err(AppError::BadRequest(
                    "El rango de vigencia del horario es incoherente".to_string(),
                ));
            }
        }

        let schedule = self
            .repository
            .create(
                request.category_id,
                request.driver_id,
                request.site_id,
                start_time,
                end_time,
                days,
                active_from,
                active_until,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            schedule.into(),
            "Horario creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ScheduleResponse, AppError> {
        let schedule = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Horario no encontrado".to_string()))?;

        Ok(schedule.into())
    }
}
