use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::schedule::ScheduleDefinition;

// Request para crear un horario semanal (de categoría o de chofer)
#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    pub category_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub site_id: Uuid,
    pub start_time: String,
    pub end_time: String,

    #[serde(default)]
    pub monday: bool,
    #[serde(default)]
    pub tuesday: bool,
    #[serde(default)]
    pub wednesday: bool,
    #[serde(default)]
    pub thursday: bool,
    #[serde(default)]
    pub friday: bool,
    #[serde(default)]
    pub saturday: bool,
    #[serde(default)]
    pub sunday: bool,

    pub active_from: Option<String>,
    pub active_until: Option<String>,
}

// Response de horario
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub id: String,
    pub category_id: Option<String>,
    pub driver_id: Option<String>,
    pub site_id: String,
    pub start_time: String,
    pub end_time: String,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    pub active_from: Option<String>,
    pub active_until: Option<String>,
    pub created_at: String,
}

impl From<ScheduleDefinition> for ScheduleResponse {
    fn from(schedule: ScheduleDefinition) -> Self {
        Self {
            id: schedule.id.to_string(),
            category_id: schedule.category_id.map(|id| id.to_string()),
            driver_id: schedule.driver_id.map(|id| id.to_string()),
            site_id: schedule.site_id.to_string(),
            start_time: schedule.start_time.to_string(),
            end_time: schedule.end_time.to_string(),
            monday: schedule.monday,
            tuesday: schedule.tuesday,
            wednesday: schedule.wednesday,
            thursday: schedule.thursday,
            friday: schedule.friday,
            saturday: schedule.saturday,
            sunday: schedule.sunday,
            active_from: schedule.active_from.map(|d| d.to_string()),
            active_until: schedule.active_until.map(|d| d.to_string()),
            created_at: schedule.created_at.to_rfc3339(),
        }
    }
}
