use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::reservation_dto::{
    CreateReservationRequest, LineItemResponse, PackageItemResponse, PackageLineRequest,
    ReactivateReservationRequest, ReservationDetailResponse, ReservationResponse,
    TicketLineRequest, UpdateReservationRequest,
};
use crate::models::reservation::ReservationStatus;
use crate::services::reservation_service::{
    CreateReservationParams, PackageLineInput, ReservationService, TicketLineInput,
    UpdateReservationParams,
};
use crate::utils::errors::AppError;

fn ticket_inputs(lines: Vec<TicketLineRequest>) -> Vec<TicketLineInput> {
    lines
        .into_iter()
        .map(|line| TicketLineInput {
            ticket_type_id: line.ticket_type_id,
            quantity: line.quantity,
        })
        .collect()
}

fn package_inputs(lines: Vec<PackageLineRequest>) -> Vec<PackageLineInput> {
    lines
        .into_iter()
        .map(|line| PackageLineInput {
            package_id: line.package_id,
            quantity: line.quantity,
        })
        .collect()
}

pub struct ReservationController {
    service: ReservationService,
}

impl ReservationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: ReservationService::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateReservationRequest,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let params = CreateReservationParams {
            client_id: request.client_id,
            instance_id: request.instance_id,
            channel_id: request.channel_id,
            site_id: request.site_id,
            seller_id: request.seller_id,
            total_amount: request.total_amount,
            notes: request.notes,
            tickets: ticket_inputs(request.tickets),
            packages: package_inputs(request.packages),
        };

        let reservation = self.service.create(params).await?;

        Ok(ApiResponse::success_with_message(
            reservation.into(),
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ReservationDetailResponse, AppError> {
        let (reservation, items, packages) = self.service.get_with_items(id).await?;

        Ok(ReservationDetailResponse {
            reservation: reservation.into(),
            tickets: items.into_iter().map(LineItemResponse::from).collect(),
            packages: packages
                .into_iter()
                .map(PackageItemResponse::from)
                .collect(),
        })
    }

    pub async fn list_by_instance(
        &self,
        instance_id: Uuid,
    ) -> Result<Vec<ReservationResponse>, AppError> {
        let reservations = self.service.list_by_instance(instance_id).await?;

        Ok(reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateReservationRequest,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let params = UpdateReservationParams {
            instance_id: request.instance_id,
            channel_id: request.channel_id,
            seller_id: request.seller_id,
            total_amount: request.total_amount,
            notes: request.notes,
            status: request.status,
            tickets: request.tickets.map(ticket_inputs),
            packages: request.packages.map(package_inputs),
        };

        let reservation = self.service.update(id, params).await?;

        Ok(ApiResponse::success_with_message(
            reservation.into(),
            "Reserva actualizada exitosamente".to_string(),
        ))
    }

    pub async fn cancel(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.service.cancel(id).await?;

        Ok(ApiResponse::message_only(
            "Reserva cancelada y cupo restituido".to_string(),
        ))
    }

    pub async fn reactivate(
        &self,
        id: Uuid,
        request: ReactivateReservationRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        let target = request.status.unwrap_or(ReservationStatus::Reservado);
        self.service.reactivate(id, target).await?;

        Ok(ApiResponse::message_only(format!(
            "Reserva reactivada como {}",
            target.as_str()
        )))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.service.delete(id).await?;

        Ok(ApiResponse::message_only(
            "Reserva eliminada exitosamente".to_string(),
        ))
    }
}
