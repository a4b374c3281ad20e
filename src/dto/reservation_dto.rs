use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::reservation::{
    Reservation, ReservationLineItem, ReservationPackageItem, ReservationStatus,
};

// Renglón de boletos individuales
#[derive(Debug, Deserialize)]
pub struct TicketLineRequest {
    pub ticket_type_id: Uuid,
    pub quantity: i32,
}

// Renglón de paquete
#[derive(Debug, Deserialize)]
pub struct PackageLineRequest {
    pub package_id: Uuid,
    pub quantity: i32,
}

// Request para crear una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    pub client_id: Uuid,
    pub instance_id: Uuid,
    pub channel_id: Uuid,
    pub site_id: Uuid,
    pub seller_id: Option<Uuid>,
    pub total_amount: Decimal,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,

    #[serde(default)]
    pub tickets: Vec<TicketLineRequest>,

    #[serde(default)]
    pub packages: Vec<PackageLineRequest>,
}

// Request para actualizar una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReservationRequest {
    pub instance_id: Option<Uuid>,
    pub channel_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub total_amount: Option<Decimal>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,

    pub status: Option<ReservationStatus>,
    pub tickets: Option<Vec<TicketLineRequest>>,
    pub packages: Option<Vec<PackageLineRequest>>,
}

// Request para reactivar una reserva cancelada
#[derive(Debug, Deserialize)]
pub struct ReactivateReservationRequest {
    pub status: Option<ReservationStatus>,
}

// Response de reserva
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: String,
    pub client_id: String,
    pub instance_id: String,
    pub channel_id: String,
    pub site_id: String,
    pub seller_id: Option<String>,
    pub total_amount: String,
    pub notes: Option<String>,
    pub status: String,
    pub total_passengers: i32,
    pub created_at: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id.to_string(),
            client_id: reservation.client_id.to_string(),
            instance_id: reservation.instance_id.to_string(),
            channel_id: reservation.channel_id.to_string(),
            site_id: reservation.site_id.to_string(),
            seller_id: reservation.seller_id.map(|id| id.to_string()),
            total_amount: reservation.total_amount.to_string(),
            notes: reservation.notes,
            status: reservation.status.as_str().to_string(),
            total_passengers: reservation.total_passengers,
            created_at: reservation.created_at.to_rfc3339(),
        }
    }
}

// Renglones en la respuesta de detalle
#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    pub ticket_type_id: String,
    pub quantity: i32,
}

impl From<ReservationLineItem> for LineItemResponse {
    fn from(item: ReservationLineItem) -> Self {
        Self {
            ticket_type_id: item.ticket_type_id.to_string(),
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PackageItemResponse {
    pub package_id: String,
    pub quantity: i32,
}

impl From<ReservationPackageItem> for PackageItemResponse {
    fn from(item: ReservationPackageItem) -> Self {
        Self {
            package_id: item.package_id.to_string(),
            quantity: item.quantity,
        }
    }
}

// Response de detalle con renglones
#[derive(Debug, Serialize)]
pub struct ReservationDetailResponse {
    #[serde(flatten)]
    pub reservation: ReservationResponse,
    pub tickets: Vec<LineItemResponse>,
    pub packages: Vec<PackageItemResponse>,
}
