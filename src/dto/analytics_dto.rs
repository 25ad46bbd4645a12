//! DTOs de analytics de flota

use num_traits::ToPrimitive;
use serde::Serialize;

use crate::models::snapshot::FleetSnapshot;

/// Response del snapshot de flota
#[derive(Debug, Serialize)]
pub struct FleetSnapshotResponse {
    pub owner_id: String,
    pub total_vehicles: i64,
    pub active_vehicles: i64,
    pub total_drivers: i64,
    pub available_drivers: i64,
    pub total_trips: i64,
    pub completed_trips: i64,
    pub pending_trips: i64,
    pub total_maintenance_cost: f64,
    pub pending_maintenance_count: i64,
    pub average_cost_per_trip: f64,
    pub fleet_health_score: f64,
    pub updated_at: String,
}

impl From<FleetSnapshot> for FleetSnapshotResponse {
    fn from(snapshot: FleetSnapshot) -> Self {
        Self {
            owner_id: snapshot.owner_id.to_string(),
            total_vehicles: snapshot.total_vehicles,
            active_vehicles: snapshot.active_vehicles,
            total_drivers: snapshot.total_drivers,
            available_drivers: snapshot.available_drivers,
            total_trips: snapshot.total_trips,
            completed_trips: snapshot.completed_trips,
            pending_trips: snapshot.pending_trips,
            total_maintenance_cost: snapshot.total_maintenance_cost.to_f64().unwrap_or(0.0),
            pending_maintenance_count: snapshot.pending_maintenance_count,
            average_cost_per_trip: snapshot.average_cost_per_trip.to_f64().unwrap_or(0.0),
            fleet_health_score: snapshot.fleet_health_score,
            updated_at: snapshot.updated_at.to_rfc3339(),
        }
    }
}
