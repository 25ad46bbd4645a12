//! Controller de vehículos
//!
//! Crea vehículos con su set de componentes (catálogo por defecto o
//! personalizado) y expone el reporte de salud por componente.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::analytics_controller::refresh_owner_snapshot;
use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{
    ComponentHealthResponse, ComponentsStatusResponse, CreateVehicleRequest, VehicleResponse,
};
use crate::models::component::{
    HealthState, LiveComponent, ServiceStatus, DEFAULT_COMPONENTS,
};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{conflict_error, AppError, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
    pool: PgPool,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        request.validate()?;

        let odometer_km = request.odometer_km.unwrap_or(0);
        if odometer_km < 0 {
            return Err(AppError::Validation(
                "odometer reading cannot be negative".to_string(),
            ));
        }

        if self.repository.plate_exists(&request.plate, owner_id).await? {
            return Err(conflict_error("Vehicle", "plate", &request.plate));
        }

        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            owner_id,
            driver_id: request.driver_id,
            plate: request.plate,
            brand: request.brand,
            model: request.model,
            vehicle_status: VehicleStatus::Active,
            odometer_km,
            health_status: HealthState::Excellent,
            created_at: now,
            updated_at: now,
        };

        // Catálogo por defecto cuando el request no trae componentes
        let specs: Vec<(String, i64)> = match request.components {
            Some(list) => list.into_iter().map(|c| (c.name, c.interval_km)).collect(),
            None => DEFAULT_COMPONENTS
                .iter()
                .map(|spec| (spec.name.to_string(), spec.interval_km))
                .collect(),
        };

        let mut components = Vec::with_capacity(specs.len());
        for (name, interval_km) in specs {
            if interval_km <= 0 {
                return Err(AppError::Validation(format!(
                    "maintenance interval for '{}' must be positive",
                    name
                )));
            }
            // Todos los componentes nacen recién servidos al odómetro actual
            components.push(LiveComponent {
                id: Uuid::new_v4(),
                vehicle_id: vehicle.id,
                name,
                interval_km,
                accumulated_km: 0,
                last_service_odometer: vehicle.odometer_km,
                next_due_odometer: vehicle.odometer_km + interval_km,
                health_state: HealthState::Excellent,
                service_status: ServiceStatus::Operational,
                created_at: now,
                updated_at: now,
            });
        }

        self.repository
            .create_with_components(&vehicle, &components)
            .await?;

        refresh_owner_snapshot(&self.pool, owner_id).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<VehicleResponse> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if vehicle.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "Vehicle does not belong to this owner".to_string(),
            ));
        }

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.repository.find_by_owner(owner_id).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    /// Reporte de salud de todos los componentes de un vehículo
    pub async fn components_status(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<ComponentsStatusResponse> {
        let (vehicle, components) = self
            .repository
            .load_vehicle_with_components(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if vehicle.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "Vehicle does not belong to this owner".to_string(),
            ));
        }

        let component_reports: Vec<ComponentHealthResponse> =
            components.iter().map(ComponentHealthResponse::from).collect();
        let requiring_maintenance = components.iter().filter(|c| c.is_due()).count();

        Ok(ComponentsStatusResponse {
            vehicle_id: vehicle.id.to_string(),
            plate: vehicle.plate,
            odometer_km: vehicle.odometer_km,
            overall_health_status: vehicle.health_status.label().to_string(),
            total_components: component_reports.len(),
            components_requiring_maintenance: requiring_maintenance,
            components: component_reports,
        })
    }
}
