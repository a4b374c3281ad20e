//! Modelo de tour recurrente
//!
//! Un tour recurrente (plantilla) vincula una categoría, una embarcación y un
//! horario semanal dentro de un rango de vigencia. El generador lo expande en
//! instancias concretas por fecha.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de un tour (plantilla o instancia) - mapea al ENUM estado_tour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "estado_tour", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TourStatus {
    Programado,
    EnCurso,
    Completado,
    Cancelado,
}

impl TourStatus {
    /// Estados que siguen ocupando recursos (embarcación/chofer)
    pub fn is_active(&self) -> bool {
        matches!(self, TourStatus::Programado | TourStatus::EnCurso)
    }

    /// Transiciones de ciclo de vida permitidas.
    ///
    /// La cancelación solo procede desde PROGRAMADO; un tour EN_CURSO
    /// únicamente puede completarse.
    pub fn can_transition_to(&self, next: TourStatus) -> bool {
        matches!(
            (self, next),
            (TourStatus::Programado, TourStatus::EnCurso)
                | (TourStatus::Programado, TourStatus::Cancelado)
                | (TourStatus::EnCurso, TourStatus::Completado)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TourStatus::Programado => "PROGRAMADO",
            TourStatus::EnCurso => "EN_CURSO",
            TourStatus::Completado => "COMPLETADO",
            TourStatus::Cancelado => "CANCELADO",
        }
    }
}

/// Tour recurrente - mapea a la tabla tour_templates
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecurringTemplate {
    pub id: Uuid,
    pub category_id: Uuid,
    pub vessel_id: Uuid,
    pub schedule_id: Uuid,
    pub site_id: Uuid,
    pub base_date: NaiveDate,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub max_capacity: i32,
    pub available_capacity: i32,
    pub status: TourStatus,
    pub driver_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        assert!(TourStatus::Programado.is_active());
        assert!(TourStatus::EnCurso.is_active());
        assert!(!TourStatus::Completado.is_active());
        assert!(!TourStatus::Cancelado.is_active());
    }

    #[test]
    fn test_transitions() {
        assert!(TourStatus::Programado.can_transition_to(TourStatus::EnCurso));
        assert!(TourStatus::Programado.can_transition_to(TourStatus::Cancelado));
        assert!(TourStatus::EnCurso.can_transition_to(TourStatus::Completado));

        // un tour en curso o completado no puede cancelarse
        assert!(!TourStatus::EnCurso.can_transition_to(TourStatus::Cancelado));
        assert!(!TourStatus::Completado.can_transition_to(TourStatus::Cancelado));
        // los estados terminales no admiten salidas
        assert!(!TourStatus::Cancelado.can_transition_to(TourStatus::Programado));
        assert!(!TourStatus::Completado.can_transition_to(TourStatus::EnCurso));
    }
}
