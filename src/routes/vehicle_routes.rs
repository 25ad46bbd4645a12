use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{
    ComponentsStatusResponse, CreateVehicleRequest, VehicleResponse,
};
use crate::routes::owner_from_auth;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/components", get(get_components_status))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let owner_id = owner_from_auth().await;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(owner_id, request).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let owner_id = owner_from_auth().await;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list_by_owner(owner_id).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let owner_id = owner_from_auth().await;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id, owner_id).await?;
    Ok(Json(response))
}

async fn get_components_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ComponentsStatusResponse>, AppError> {
    let owner_id = owner_from_auth().await;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.components_status(id, owner_id).await?;
    Ok(Json(response))
}
