use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::template_controller::TemplateController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::template_dto::{
    CreateTemplateRequest, GenerateInstancesResponse, TemplateFilters, TemplateResponse,
    UpdateTemplateRequest, UpdateTemplateStatusRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_template_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_template))
        .route("/", get(list_templates))
        .route("/:id", get(get_template))
        .route("/:id", put(update_template))
        .route("/:id/status", put(update_template_status))
        .route("/:id/generate", post(generate_instances))
}

async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<Json<ApiResponse<TemplateResponse>>, AppError> {
    let controller = TemplateController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_templates(
    State(state): State<AppState>,
    Query(filters): Query<TemplateFilters>,
) -> Result<Json<Vec<TemplateResponse>>, AppError> {
    let controller = TemplateController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TemplateResponse>, AppError> {
    let controller = TemplateController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<ApiResponse<TemplateResponse>>, AppError> {
    let controller = TemplateController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn update_template_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTemplateStatusRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TemplateController::new(state.pool.clone());
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}

async fn generate_instances(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<GenerateInstancesResponse>>, AppError> {
    let controller = TemplateController::new(state.pool.clone());
    let response = controller.generate(id).await?;
    Ok(Json(response))
}
