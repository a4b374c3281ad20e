//! Modelo de reserva
//!
//! Una reserva consume cupo de una instancia de tour. El total de pasajeros
//! se deriva de sus renglones (tipo de boleto × cantidad) y de sus paquetes
//! (cantidad × pasajeros fijos del paquete).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de una reserva - mapea al ENUM estado_reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "estado_reserva", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Reservado,
    Confirmada,
    Cancelada,
}

impl ReservationStatus {
    /// Una reserva activa mantiene cupo consumido en su instancia
    pub fn is_active(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelada)
    }

    /// Transiciones directas del ciclo de vida. La reactivación desde
    /// CANCELADA es una operación aparte, no una transición directa.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (ReservationStatus::Reservado, ReservationStatus::Confirmada)
                | (ReservationStatus::Reservado, ReservationStatus::Cancelada)
                | (ReservationStatus::Confirmada, ReservationStatus::Cancelada)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Reservado => "RESERVADO",
            ReservationStatus::Confirmada => "CONFIRMADA",
            ReservationStatus::Cancelada => "CANCELADA",
        }
    }
}

/// Reserva - mapea a la tabla reservations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub client_id: Uuid,
    pub instance_id: Uuid,
    pub channel_id: Uuid,
    pub site_id: Uuid,
    pub seller_id: Option<Uuid>,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub total_passengers: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Renglón de boletos individuales - mapea a reservation_items
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReservationLineItem {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub ticket_type_id: Uuid,
    pub quantity: i32,
}

/// Renglón de paquete - mapea a reservation_package_items
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReservationPackageItem {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub package_id: Uuid,
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        assert!(ReservationStatus::Reservado.is_active());
        assert!(ReservationStatus::Confirmada.is_active());
        assert!(!ReservationStatus::Cancelada.is_active());
    }

    #[test]
    fn test_transitions() {
        assert!(ReservationStatus::Reservado.can_transition_to(ReservationStatus::Confirmada));
        assert!(ReservationStatus::Reservado.can_transition_to(ReservationStatus::Cancelada));
        assert!(ReservationStatus::Confirmada.can_transition_to(ReservationStatus::Cancelada));

        assert!(!ReservationStatus::Confirmada.can_transition_to(ReservationStatus::Reservado));
        assert!(!ReservationStatus::Cancelada.can_transition_to(ReservationStatus::Reservado));
        assert!(!ReservationStatus::Cancelada.can_transition_to(ReservationStatus::Confirmada));
    }
}
