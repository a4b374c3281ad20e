use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::template_dto::{
    CreateTemplateRequest, GenerateInstancesResponse, TemplateFilters, TemplateResponse,
    UpdateTemplateRequest, UpdateTemplateStatusRequest,
};
use crate::repositories::template_repository::TemplateRepository;
use crate::services::generation_service::GenerationService;
use crate::services::template_service::{
    CreateTemplateParams, TemplateService, UpdateTemplateParams,
};
use crate::utils::errors::AppError;
use crate::utils::validation::parse_date;

pub struct TemplateController {
    service: TemplateService,
    generation: GenerationService,
    repository: TemplateRepository,
}

impl TemplateController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: TemplateService::new(pool.clone()),
            generation: GenerationService::new(pool.clone()),
            repository: TemplateRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateTemplateRequest,
    ) -> Result<ApiResponse<TemplateResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let params = CreateTemplateParams {
            category_id: request.category_id,
            vessel_id: request.vessel_id,
            schedule_id: request.schedule_id,
            site_id: request.site_id,
            base_date: parse_date(&request.base_date)?,
            valid_from: parse_date(&request.valid_from)?,
            valid_until: parse_date(&request.valid_until)?,
            max_capacity: request.max_capacity,
            driver_id: request.driver_id,
        };

        let template = self.service.create(params).await?;

        Ok(ApiResponse::success_with_message(
            template.into(),
            "Tour recurrente creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TemplateResponse, AppError> {
        let template = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tour recurrente no encontrado".to_string()))?;

        Ok(template.into())
    }

    pub async fn list(&self, filters: TemplateFilters) -> Result<Vec<TemplateResponse>, AppError> {
        let limit = filters.limit.unwrap_or(50).min(100);
        let offset = filters.offset.unwrap_or(0);

        let templates = self
            .repository
            .list_by_site(filters.site_id, limit, offset)
            .await?;

        Ok(templates.into_iter().map(TemplateResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateTemplateRequest,
    ) -> Result<ApiResponse<TemplateResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let valid_from = request.valid_from.as_deref().map(parse_date).transpose()?;
        let valid_until = request.valid_until.as_deref().map(parse_date).transpose()?;

        let params = UpdateTemplateParams {
            vessel_id: request.vessel_id,
            schedule_id: request.schedule_id,
            valid_from,
            valid_until,
            max_capacity: request.max_capacity,
            driver_id: request.driver_id,
        };

        let template = self.service.update(id, params).await?;

        Ok(ApiResponse::success_with_message(
            template.into(),
            "Tour recurrente actualizado exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateTemplateStatusRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        self.service.update_status(id, request.status).await?;

        Ok(ApiResponse::message_only(format!(
            "Estado del tour actualizado a {}",
            request.status.as_str()
        )))
    }

    pub async fn generate(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<GenerateInstancesResponse>, AppError> {
        let created = self.generation.generate_instances(id).await?;

        Ok(ApiResponse::success_with_message(
            GenerateInstancesResponse {
                template_id: id.to_string(),
                instances_created: created,
            },
            format!("{} instancias generadas exitosamente", created),
        ))
    }
}
