use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::template::{RecurringTemplate, TourStatus};

// Request para crear un tour recurrente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    pub category_id: Uuid,
    pub vessel_id: Uuid,
    pub schedule_id: Uuid,
    pub site_id: Uuid,
    pub base_date: String,
    pub valid_from: String,
    pub valid_until: String,

    #[validate(range(min = 1, max = 500))]
    pub max_capacity: i32,

    pub driver_id: Option<Uuid>,
}

// Request para actualizar un tour recurrente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTemplateRequest {
    pub vessel_id: Option<Uuid>,
    pub schedule_id: Option<Uuid>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,

    #[validate(range(min = 1, max = 500))]
    pub max_capacity: Option<i32>,

    pub driver_id: Option<Uuid>,
}

// Request para cambiar el estado del tour
#[derive(Debug, Deserialize)]
pub struct UpdateTemplateStatusRequest {
    pub status: TourStatus,
}

// Filtros de listado
#[derive(Debug, Deserialize)]
pub struct TemplateFilters {
    pub site_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Response de tour recurrente
#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub id: String,
    pub category_id: String,
    pub vessel_id: String,
    pub schedule_id: String,
    pub site_id: String,
    pub base_date: String,
    pub valid_from: String,
    pub valid_until: String,
    pub max_capacity: i32,
    pub available_capacity: i32,
    pub status: String,
    pub driver_id: Option<String>,
    pub created_at: String,
}

impl From<RecurringTemplate> for TemplateResponse {
    fn from(template: RecurringTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            category_id: template.category_id.to_string(),
            vessel_id: template.vessel_id.to_string(),
            schedule_id: template.schedule_id.to_string(),
            site_id: template.site_id.to_string(),
            base_date: template.base_date.to_string(),
            valid_from: template.valid_from.to_string(),
            valid_until: template.valid_until.to_string(),
            max_capacity: template.max_capacity,
            available_capacity: template.available_capacity,
            status: template.status.as_str().to_string(),
            driver_id: template.driver_id.map(|id| id.to_string()),
            created_at: template.created_at.to_rfc3339(),
        }
    }
}

// Response de generación de instancias
#[derive(Debug, Serialize)]
pub struct GenerateInstancesResponse {
    pub template_id: String,
    pub instances_created: u32,
}
