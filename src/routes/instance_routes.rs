use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::instance_controller::InstanceController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::instance_dto::{
    AssignDriverRequest, AvailabilityResponse, CheckAvailabilityQuery, CreateInstanceRequest,
    InstanceFilters, InstanceResponse, UpdateInstanceRequest, UpdateInstanceStatusRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_instance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_instance))
        .route("/", get(list_instances))
        .route("/:id", get(get_instance))
        .route("/:id", put(update_instance))
        .route("/:id", delete(delete_instance))
        .route("/:id/status", put(update_instance_status))
        .route("/:id/driver", put(assign_driver))
        .route("/:id/availability", get(check_availability))
}

async fn create_instance(
    State(state): State<AppState>,
    Json(request): Json<CreateInstanceRequest>,
) -> Result<Json<ApiResponse<InstanceResponse>>, AppError> {
    let controller = InstanceController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_instances(
    State(state): State<AppState>,
    Query(filters): Query<InstanceFilters>,
) -> Result<Json<Vec<InstanceResponse>>, AppError> {
    let controller = InstanceController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InstanceResponse>, AppError> {
    let controller = InstanceController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInstanceRequest>,
) -> Result<Json<ApiResponse<InstanceResponse>>, AppError> {
    let controller = InstanceController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = InstanceController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn update_instance_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInstanceStatusRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = InstanceController::new(state.pool.clone());
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}

async fn assign_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignDriverRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = InstanceController::new(state.pool.clone());
    let response = controller.assign_driver(id, request).await?;
    Ok(Json(response))
}

async fn check_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CheckAvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let controller = InstanceController::new(state.pool.clone());
    let response = controller.check_availability(id, query).await?;
    Ok(Json(response))
}
