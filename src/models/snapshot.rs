//! Modelo de FleetSnapshot
//!
//! Agregado por owner, recalculado bajo demanda a partir de los registros
//! actuales de vehículos, componentes y viajes. Nunca se edita a mano.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::component::{LiveComponent, ServiceRecord};
use crate::models::trip::Trip;
use crate::models::vehicle::Vehicle;

/// Snapshot de la flota de un owner - mapea a la tabla fleet_snapshots
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FleetSnapshot {
    pub owner_id: Uuid,

    // Vehículos y conductores
    pub total_vehicles: i64,
    pub active_vehicles: i64,
    pub total_drivers: i64,
    pub available_drivers: i64,

    // Viajes
    pub total_trips: i64,
    pub completed_trips: i64,
    pub pending_trips: i64,

    // Mantenimiento y costos
    pub total_maintenance_cost: Decimal,
    pub pending_maintenance_count: i64,
    pub average_cost_per_trip: Decimal,

    /// Puntaje compuesto de salud de la flota, en [0, 100]
    pub fleet_health_score: f64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registros de la flota de un owner al momento de agregar
///
/// Es la entrada de solo-lectura del agregador; la arma el repositorio
/// en una sola pasada para evitar lecturas incrementales con drift.
#[derive(Debug, Clone)]
pub struct OwnerFleet {
    pub vehicles: Vec<Vehicle>,
    pub components: Vec<LiveComponent>,
    pub service_history: Vec<ServiceRecord>,
    pub trips: Vec<Trip>,
}
