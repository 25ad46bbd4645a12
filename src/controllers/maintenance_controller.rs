//! Controller de mantenimiento
//!
//! Aprobación/rechazo del servicio de un componente. Solo la aprobación
//! resetea el desgaste y genera una entrada de historial con costo.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::controllers::analytics_controller::refresh_owner_snapshot;
use crate::dto::common::ApiResponse;
use crate::dto::maintenance_dto::{ServiceApprovalRequest, ServiceRecordResponse};
use crate::models::component::ServiceDecision;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct MaintenanceController {
    vehicles: VehicleRepository,
    pool: PgPool,
}

impl MaintenanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            pool,
        }
    }

    /// Aprobar o rechazar el servicio de un componente
    pub async fn decide_service(
        &self,
        owner_id: Uuid,
        component_id: Uuid,
        request: ServiceApprovalRequest,
    ) -> AppResult<ApiResponse<Option<ServiceRecordResponse>>> {
        let component = self
            .vehicles
            .find_component(component_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Component not found".to_string()))?;

        let (mut vehicle, mut components) = self
            .vehicles
            .load_vehicle_with_components(component.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if vehicle.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "Component does not belong to this owner".to_string(),
            ));
        }

        let cost = request.cost.unwrap_or(Decimal::ZERO);
        let record = crate::services::odometer_service::complete_service(
            &mut vehicle,
            &mut components,
            component_id,
            request.approval_status,
            cost,
        )?;

        self.vehicles
            .save_vehicle_and_components(&vehicle, &components)
            .await?;

        let response = match record {
            Some(record) => {
                self.vehicles.insert_service_record(&record).await?;
                refresh_owner_snapshot(&self.pool, owner_id).await?;
                ApiResponse::success_with_message(
                    Some(ServiceRecordResponse::from(record)),
                    "Maintenance approved and component reset".to_string(),
                )
            }
            None => ApiResponse::success_with_message(
                None,
                "Maintenance rejected; component wear unchanged".to_string(),
            ),
        };

        // El rechazo no toca el desgaste, así que solo la aprobación
        // necesita refrescar métricas
        if request.approval_status == ServiceDecision::Rejected {
            tracing::info!(
                component_id = %component_id,
                "service rejected by owner, wear counters untouched"
            );
        }

        Ok(response)
    }
}
