//! Modelo de instancia de tour
//!
//! Una instancia es la ocurrencia concreta y reservable de un tour en una
//! fecha. Conserva su propio cupo máximo (copiado de la plantilla al momento
//! de generarla) y el cupo disponible, que es el valor autoritativo para las
//! reservas.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::template::TourStatus;

/// Tipo de recurso físico compartido entre instancias
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Vessel,
    Driver,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Vessel => "embarcación",
            ResourceKind::Driver => "chofer",
        }
    }
}

/// Instancia de tour - mapea a la tabla tour_instances
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TourInstance {
    pub id: Uuid,
    pub template_id: Option<Uuid>,
    pub tour_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub vessel_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub max_capacity: i32,
    pub available_seats: i32,
    pub status: TourStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TourInstance {
    /// Sigue aceptando reservas y bloqueando recursos
    pub fn is_active(&self) -> bool {
        self.status.is_active() && self.deleted_at.is_none()
    }

    /// Puede recibir reservas nuevas
    pub fn is_bookable(&self) -> bool {
        self.status == TourStatus::Programado && self.deleted_at.is_none()
    }
}
