use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::instance_dto::{
    AssignDriverRequest, AvailabilityResponse, CheckAvailabilityQuery, CreateInstanceRequest,
    InstanceFilters, InstanceResponse, UpdateInstanceRequest, UpdateInstanceStatusRequest,
};
use crate::repositories::instance_repository::InstanceRepository;
use crate::services::instance_service::{
    CreateInstanceParams, InstanceService, UpdateInstanceParams,
};
use crate::utils::errors::AppError;
use crate::utils::validation::{parse_date, parse_time};

pub struct InstanceController {
    service: InstanceService,
    repository: InstanceRepository,
}

impl InstanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: InstanceService::new(pool.clone()),
            repository: InstanceRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateInstanceRequest,
    ) -> Result<ApiResponse<InstanceResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let params = CreateInstanceParams {
            template_id: request.template_id,
            tour_date: parse_date(&request.tour_date)?,
            start_time: parse_time(&request.start_time)?,
            end_time: parse_time(&request.end_time)?,
            vessel_id: request.vessel_id,
            driver_id: request.driver_id,
            max_capacity: request.max_capacity,
        };

        let instance = self.service.create_instance(params).await?;

        Ok(ApiResponse::success_with_message(
            instance.into(),
            "Instancia de tour creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<InstanceResponse, AppError> {
        let instance = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instancia de tour no encontrada".to_string()))?;

        Ok(instance.into())
    }

    pub async fn list(&self, filters: InstanceFilters) -> Result<Vec<InstanceResponse>, AppError> {
        let instances = if let Some(template_id) = filters.template_id {
            self.repository.list_by_template(template_id).await?
        } else if let Some(date) = filters.date.as_deref() {
            self.repository.list_by_date(parse_date(date)?).await?
        } else {
            return Err(AppError::BadRequest(
                "Indique template_id o date para listar instancias".to_string(),
            ));
        };

        Ok(instances.into_iter().map(InstanceResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateInstanceRequest,
    ) -> Result<ApiResponse<InstanceResponse>, AppError> {
        let params = UpdateInstanceParams {
            tour_date: request.tour_date.as_deref().map(parse_date).transpose()?,
            start_time: request.start_time.as_deref().map(parse_time).transpose()?,
            end_time: request.end_time.as_deref().map(parse_time).transpose()?,
            vessel_id: request.vessel_id,
            driver_id: request.driver_id,
        };

        let instance = self.service.update_instance(id, params).await?;

        Ok(ApiResponse::success_with_message(
            instance.into(),
            "Instancia de tour actualizada exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateInstanceStatusRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        self.service.update_status(id, request.status).await?;

        Ok(ApiResponse::message_only(format!(
            "Estado de la instancia actualizado a {}",
            request.status.as_str()
        )))
    }

    pub async fn assign_driver(
        &self,
        id: Uuid,
        request: AssignDriverRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        self.service.assign_driver(id, request.driver_id).await?;

        Ok(ApiResponse::message_only(
            "Chofer asignado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.service.delete_instance(id).await?;

        Ok(ApiResponse::message_only(
            "Instancia de tour eliminada exitosamente".to_string(),
        ))
    }

    pub async fn check_availability(
        &self,
        id: Uuid,
        query: CheckAvailabilityQuery,
    ) -> Result<AvailabilityResponse, AppError> {
        let available = self
            .service
            .check_availability(id, query.passengers)
            .await?;

        Ok(AvailabilityResponse {
            instance_id: id.to_string(),
            passengers: query.passengers,
            available,
        })
    }
}
