use axum::{
    extract::{Path, State},
    routing::patch,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::common::ApiResponse;
use crate::dto::maintenance_dto::{ServiceApprovalRequest, ServiceRecordResponse};
use crate::routes::owner_from_auth;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new().route("/:component_id/approve", patch(decide_service))
}

async fn decide_service(
    State(state): State<AppState>,
    Path(component_id): Path<Uuid>,
    Json(request): Json<ServiceApprovalRequest>,
) -> Result<Json<ApiResponse<Option<ServiceRecordResponse>>>, AppError> {
    let owner_id = owner_from_auth().await;
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller
        .decide_service(owner_id, component_id, request)
        .await?;
    Ok(Json(response))
}
