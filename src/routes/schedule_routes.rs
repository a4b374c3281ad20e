use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::schedule_controller::ScheduleController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::schedule_dto::{CreateScheduleRequest, ScheduleResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_schedule_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_schedule))
        .route("/:id", get(get_schedule))
}

async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<Json<ApiResponse<ScheduleResponse>>, AppError> {
    let controller = ScheduleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let controller = ScheduleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}
