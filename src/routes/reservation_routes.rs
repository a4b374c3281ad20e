use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::reservation_controller::ReservationController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::reservation_dto::{
    CreateReservationRequest, ReactivateReservationRequest, ReservationDetailResponse,
    ReservationResponse, UpdateReservationRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reservation_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_reservation))
        .route("/:id", get(get_reservation))
        .route("/:id", put(update_reservation))
        .route("/:id", delete(delete_reservation))
        .route("/:id/cancel", post(cancel_reservation))
        .route("/:id/reactivate", post(reactivate_reservation))
        .route("/instance/:instance_id", get(list_by_instance))
}

async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationDetailResponse>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.cancel(id).await?;
    Ok(Json(response))
}

async fn reactivate_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReactivateReservationRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.reactivate(id, request).await?;
    Ok(Json(response))
}

async fn list_by_instance(
    State(state): State<AppState>,
    Path(instance_id): Path<Uuid>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.list_by_instance(instance_id).await?;
    Ok(Json(response))
}
