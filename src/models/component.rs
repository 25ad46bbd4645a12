//! Modelos de componentes mecánicos
//!
//! Este módulo separa las dos vistas que el sistema necesita de un
//! componente: `LiveComponent` (la instancia viva cuyo desgaste se rastrea)
//! y `ServiceRecord` (la entrada inmutable del historial de servicios).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de salud de un componente - mapea al ENUM health_state
///
/// El orden de declaración define el orden total: `MaintenanceRequired`
/// es el estado más degradado, por lo que la salud agregada de un vehículo
/// es simplemente `max` sobre sus componentes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, PartialOrd, Ord)]
#[sqlx(type_name = "health_state", rename_all = "snake_case")]
pub enum HealthState {
    Excellent,
    VeryGood,
    Good,
    Fair,
    MaintenanceRequired,
}

impl HealthState {
    /// Etiqueta legible para respuestas de la API
    pub fn label(&self) -> &'static str {
        match self {
            HealthState::Excellent => "Excellent",
            HealthState::VeryGood => "Very Good",
            HealthState::Good => "Good",
            HealthState::Fair => "Fair",
            HealthState::MaintenanceRequired => "Maintenance Required",
        }
    }
}

/// Estado administrativo de la solicitud de servicio de un componente
///
/// Un rechazo del owner no toca los contadores de desgaste; solo queda
/// registrado aquí.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "service_status", rename_all = "snake_case")]
pub enum ServiceStatus {
    Operational,
    ServiceRejected,
}

/// Decisión del owner sobre una solicitud de servicio
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServiceDecision {
    Approved,
    Rejected,
}

/// Componente vivo de un vehículo - mapea a la tabla components
///
/// Invariante: `next_due_odometer = last_service_odometer + interval_km`.
/// `health_state` siempre es derivable de `accumulated_km / interval_km`;
/// nunca es una fuente de verdad independiente.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct LiveComponent {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub name: String,
    pub interval_km: i64,
    pub accumulated_km: i64,
    pub last_service_odometer: i64,
    pub next_due_odometer: i64,
    pub health_state: HealthState,
    pub service_status: ServiceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LiveComponent {
    /// Kilómetros restantes hasta el próximo servicio (nunca negativo)
    pub fn km_remaining(&self) -> i64 {
        (self.interval_km - self.accumulated_km).max(0)
    }

    pub fn is_due(&self) -> bool {
        self.health_state == HealthState::MaintenanceRequired
    }
}

/// Entrada inmutable del historial de servicios completados
///
/// A diferencia del componente vivo, siempre lleva un costo facturado > 0.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub component_name: String,
    pub cost: Decimal,
    pub odometer_at_service: i64,
    pub completed_at: DateTime<Utc>,
}

/// Especificación de un componente en el catálogo por defecto
#[derive(Debug, Clone)]
pub struct ComponentSpec {
    pub name: &'static str,
    pub interval_km: i64,
}

lazy_static::lazy_static! {
    /// Componentes por defecto para un vehículo nuevo
    pub static ref DEFAULT_COMPONENTS: Vec<ComponentSpec> = vec![
        ComponentSpec { name: "Filtros",     interval_km: 10_000 },
        ComponentSpec { name: "Aceite",      interval_km:  5_000 },
        ComponentSpec { name: "Inyecciones", interval_km:  8_000 },
        ComponentSpec { name: "Frenos",      interval_km:  9_500 },
        ComponentSpec { name: "Neumático",   interval_km: 12_000 },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_state_order_is_worst_last() {
        assert!(HealthState::MaintenanceRequired > HealthState::Fair);
        assert!(HealthState::Fair > HealthState::Good);
        assert!(HealthState::Good > HealthState::VeryGood);
        assert!(HealthState::VeryGood > HealthState::Excellent);
    }

    #[test]
    fn default_catalogue_has_positive_intervals() {
        assert_eq!(DEFAULT_COMPONENTS.len(), 5);
        for spec in DEFAULT_COMPONENTS.iter() {
            assert!(spec.interval_km > 0, "{} sin intervalo", spec.name);
        }
    }
}
