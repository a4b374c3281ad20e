//! Servicio de tours recurrentes

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::template::{RecurringTemplate, TourStatus};
use crate::repositories::catalog_repository::CatalogRepository;
use crate::repositories::schedule_repository::ScheduleRepository;
use crate::repositories::template_repository::TemplateRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_date_range, validate_positive};

pub struct CreateTemplateParams {
    pub category_id: Uuid,
    pub vessel_id: Uuid,
    pub schedule_id: Uuid,
    pub site_id: Uuid,
    pub base_date: NaiveDate,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub max_capacity: i32,
    pub driver_id: Option<Uuid>,
}

#[derive(Default)]
pub struct UpdateTemplateParams {
    pub vessel_id: Option<Uuid>,
    pub schedule_id: Option<Uuid>,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub max_capacity: Option<i32>,
    pub driver_id: Option<Uuid>,
}

pub struct TemplateService {
    pool: PgPool,
}

impl TemplateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, params: CreateTemplateParams) -> Result<RecurringTemplate, AppError> {
        validate_date_range(params.valid_from, params.valid_until)?;
        validate_positive("cupo_maximo", params.max_capacity)?;

        let mut tx = self.pool.begin().await?;

        if !CatalogRepository::category_exists(&mut tx, params.category_id).await? {
            return Err(AppError::NotFound("Categoría de tour no encontrada".to_string()));
        }
        if !CatalogRepository::site_exists(&mut tx, params.site_id).await? {
            return Err(AppError::NotFound("Sede no encontrada".to_string()));
        }

        let vessel_status = CatalogRepository::vessel_status(&mut tx, params.vessel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Embarcación no encontrada".to_string()))?;
        if vessel_status != "active" {
            return Err(AppError::Conflict(format!(
                "La embarcación no está disponible (estado '{}')",
                vessel_status
            )));
        }

        let schedule = ScheduleRepository::find_by_id_tx(&mut tx, params.schedule_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Horario no encontrado".to_string()))?;
        if !schedule.has_any_day() {
            return Err(AppError::BadRequest(
                "El horario no tiene ningún día de la semana marcado".to_string(),
            ));
        }

        if let Some(driver_id) = params.driver_id {
            if !CatalogRepository::person_has_role(&mut tx, driver_id, &["driver"]).await? {
                return Err(AppError::NotFound("Chofer no encontrado".to_string()));
            }
        }

        let template = TemplateRepository::create_tx(
            &mut tx,
            params.category_id,
            params.vessel_id,
            params.schedule_id,
            params.site_id,
            params.base_date,
            params.valid_from,
            params.valid_until,
            params.max_capacity,
            params.driver_id,
        )
        .await?;

        tx.commit().await?;

        info!(template_id = %template.id, "tour recurrente creado");

        Ok(template)
    }

    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateTemplateParams,
    ) -> Result<RecurringTemplate, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = TemplateRepository::find_by_id_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tour recurrente no encontrado".to_string()))?;

        if current.status != TourStatus::Programado {
            return Err(AppError::InvalidTransition(format!(
                "Solo un tour PROGRAMADO puede editarse (estado actual: {})",
                current.status.as_str()
            )));
        }

        let valid_from = params.valid_from.unwrap_or(current.valid_from);
        let valid_until = params.valid_until.unwrap_or(current.valid_until);
        validate_date_range(valid_from, valid_until)?;

        if let Some(capacity) = params.max_capacity {
            validate_positive("cupo_maximo", capacity)?;
        }

        if let Some(vessel_id) = params.vessel_id {
            let vessel_status = CatalogRepository::vessel_status(&mut tx, vessel_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Embarcación no encontrada".to_string()))?;
            if vessel_status != "active" {
                return Err(AppError::Conflict(format!(
                    "La embarcación no está disponible (estado '{}')",
                    vessel_status
                )));
            }
        }

        if let Some(schedule_id) = params.schedule_id {
            ScheduleRepository::find_by_id_tx(&mut tx, schedule_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Horario no encontrado".to_string()))?;
        }

        if let Some(driver_id) = params.driver_id {
            if !CatalogRepository::person_has_role(&mut tx, driver_id, &["driver"]).await? {
                return Err(AppError::NotFound("Chofer no encontrado".to_string()));
            }
        }

        let updated = TemplateRepository::update_tx(
            &mut tx,
            id,
            params.vessel_id,
            params.schedule_id,
            params.valid_from,
            params.valid_until,
            params.max_capacity,
            params.driver_id,
        )
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Transición de estado del tour recurrente. La cancelación solo procede
    /// desde PROGRAMADO; un tour EN_CURSO o COMPLETADO no puede cancelarse.
    pub async fn update_status(&self, id: Uuid, status: TourStatus) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let current = TemplateRepository::find_by_id_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tour recurrente no encontrado".to_string()))?;

        if !current.status.can_transition_to(status) {
            return Err(AppError::InvalidTransition(format!(
                "Transición no permitida: {} → {}",
                current.status.as_str(),
                status.as_str()
            )));
        }

        TemplateRepository::set_status_tx(&mut tx, id, status).await?;
        tx.commit().await?;

        info!(template_id = %id, status = status.as_str(), "estado de tour recurrente actualizado");

        Ok(())
    }
}
