use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::{CompleteTripResponse, TripController};
use crate::dto::trip_dto::{
    CompleteTripRequest, CreateTripRequest, TripCreatedResponse, TripResponse,
    UpdateTripStatusRequest,
};
use crate::routes::owner_from_auth;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_trip))
        .route("/:id", get(get_trip))
        .route("/:id", patch(update_trip_status))
        .route("/:id/complete", patch(complete_trip))
}

async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<TripCreatedResponse>, AppError> {
    let owner_id = owner_from_auth().await;
    let controller = TripController::new(state.pool.clone(), state.distance_estimator.clone());
    let response = controller.create_trip(owner_id, request).await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripResponse>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.distance_estimator.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_trip_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTripStatusRequest>,
) -> Result<Json<TripResponse>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.distance_estimator.clone());
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}

async fn complete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteTripRequest>,
) -> Result<Json<CompleteTripResponse>, AppError> {
    let owner_id = owner_from_auth().await;
    let controller = TripController::new(state.pool.clone(), state.distance_estimator.clone());
    let response = controller.complete_trip(owner_id, id, request).await?;
    Ok(Json(response))
}
