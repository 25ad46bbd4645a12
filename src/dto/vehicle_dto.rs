//! DTOs de vehículos y reporte de componentes

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::component::LiveComponent;
use crate::models::vehicle::Vehicle;

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 5, max = 20))]
    pub plate: String,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub model: Option<String>,

    /// Kilometraje inicial del odómetro; 0 si no se indica
    pub odometer_km: Option<i64>,

    pub driver_id: Option<Uuid>,

    /// Componentes personalizados; si falta se usa el catálogo por defecto
    pub components: Option<Vec<CreateComponentSpec>>,
}

/// Especificación de un componente al crear el vehículo
#[derive(Debug, Deserialize)]
pub struct CreateComponentSpec {
    pub name: String,
    pub interval_km: i64,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub owner_id: String,
    pub driver_id: Option<String>,
    pub plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vehicle_status: String,
    pub odometer_km: i64,
    pub health_status: String,
    pub created_at: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id.to_string(),
            owner_id: vehicle.owner_id.to_string(),
            driver_id: vehicle.driver_id.map(|d| d.to_string()),
            plate: vehicle.plate,
            brand: vehicle.brand,
            model: vehicle.model,
            vehicle_status: format!("{:?}", vehicle.vehicle_status),
            odometer_km: vehicle.odometer_km,
            health_status: vehicle.health_status.label().to_string(),
            created_at: vehicle.created_at.to_rfc3339(),
        }
    }
}

/// Salud de un componente individual en el reporte
#[derive(Debug, Serialize)]
pub struct ComponentHealthResponse {
    pub component_id: String,
    pub component_name: String,
    pub current_status: String,
    /// Porcentaje de vida restante, 0-100
    pub health_percentage: i64,
    pub interval_km: i64,
    pub accumulated_km: i64,
    pub last_service_odometer: i64,
    pub next_due_odometer: i64,
    pub km_remaining: i64,
}

impl From<&LiveComponent> for ComponentHealthResponse {
    fn from(component: &LiveComponent) -> Self {
        let health_percentage = if component.interval_km > 0 {
            (100 - component.accumulated_km * 100 / component.interval_km).clamp(0, 100)
        } else {
            100
        };

        Self {
            component_id: component.id.to_string(),
            component_name: component.name.clone(),
            current_status: component.health_state.label().to_string(),
            health_percentage,
            interval_km: component.interval_km,
            accumulated_km: component.accumulated_km,
            last_service_odometer: component.last_service_odometer,
            next_due_odometer: component.next_due_odometer,
            km_remaining: component.km_remaining(),
        }
    }
}

/// Reporte de salud de todos los componentes de un vehículo
#[derive(Debug, Serialize)]
pub struct ComponentsStatusResponse {
    pub vehicle_id: String,
    pub plate: String,
    pub odometer_km: i64,
    pub overall_health_status: String,
    pub components: Vec<ComponentHealthResponse>,
    pub total_components: usize,
    pub components_requiring_maintenance: usize,
}
