use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::instance::TourInstance;
use crate::models::template::TourStatus;

// Request para crear una instancia manualmente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInstanceRequest {
    pub template_id: Option<Uuid>,
    pub tour_date: String,
    pub start_time: String,
    pub end_time: String,
    pub vessel_id: Uuid,
    pub driver_id: Option<Uuid>,

    #[validate(range(min = 1, max = 500))]
    pub max_capacity: Option<i32>,
}

// Request para editar fecha/horario/recursos de una instancia
#[derive(Debug, Deserialize)]
pub struct UpdateInstanceRequest {
    pub tour_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub vessel_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}

// Request para cambiar el estado de la instancia
#[derive(Debug, Deserialize)]
pub struct UpdateInstanceStatusRequest {
    pub status: TourStatus,
}

// Request para asignar chofer
#[derive(Debug, Deserialize)]
pub struct AssignDriverRequest {
    pub driver_id: Uuid,
}

// Query de consulta de disponibilidad
#[derive(Debug, Deserialize)]
pub struct CheckAvailabilityQuery {
    pub passengers: i32,
}

// Filtros de listado de instancias
#[derive(Debug, Deserialize)]
pub struct InstanceFilters {
    pub template_id: Option<Uuid>,
    pub date: Option<String>,
}

// Response de instancia
#[derive(Debug, Serialize)]
pub struct InstanceResponse {
    pub id: String,
    pub template_id: Option<String>,
    pub tour_date: String,
    pub start_time: String,
    pub end_time: String,
    pub vessel_id: String,
    pub driver_id: Option<String>,
    pub max_capacity: i32,
    pub available_seats: i32,
    pub status: String,
    pub created_at: String,
}

impl From<TourInstance> for InstanceResponse {
    fn from(instance: TourInstance) -> Self {
        Self {
            id: instance.id.to_string(),
            template_id: instance.template_id.map(|id| id.to_string()),
            tour_date: instance.tour_date.to_string(),
            start_time: instance.start_time.to_string(),
            end_time: instance.end_time.to_string(),
            vessel_id: instance.vessel_id.to_string(),
            driver_id: instance.driver_id.map(|id| id.to_string()),
            max_capacity: instance.max_capacity,
            available_seats: instance.available_seats,
            status: instance.status.as_str().to_string(),
            created_at: instance.created_at.to_rfc3339(),
        }
    }
}

// Response de consulta de disponibilidad
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub instance_id: String,
    pub passengers: i32,
    pub available: bool,
}
