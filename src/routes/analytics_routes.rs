use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::analytics_controller::AnalyticsController;
use crate::dto::analytics_dto::FleetSnapshotResponse;
use crate::routes::owner_from_auth;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_analytics_router() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(get_fleet_analytics))
        .route("/analytics/refresh", put(refresh_fleet_analytics))
}

async fn get_fleet_analytics(
    State(state): State<AppState>,
) -> Result<Json<FleetSnapshotResponse>, AppError> {
    let owner_id = owner_from_auth().await;
    let controller = AnalyticsController::new(state.pool.clone());
    let response = controller.get_snapshot(owner_id).await?;
    Ok(Json(response))
}

async fn refresh_fleet_analytics(
    State(state): State<AppState>,
) -> Result<Json<FleetSnapshotResponse>, AppError> {
    let owner_id = owner_from_auth().await;
    let controller = AnalyticsController::new(state.pool.clone());
    let response = controller.refresh(owner_id).await?;
    Ok(Json(response))
}
