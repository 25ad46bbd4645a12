//! Repositorio de flota y snapshots
//!
//! Arma la vista completa de la flota de un owner en una sola pasada para
//! el agregador, y persiste el snapshot resultante con semántica de upsert.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::component::{LiveComponent, ServiceRecord};
use crate::models::snapshot::{FleetSnapshot, OwnerFleet};
use crate::models::trip::Trip;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

pub struct FleetRepository {
    pool: PgPool,
}

impl FleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cargar vehículos + componentes + historial + viajes de un owner
    pub async fn load_owner_fleet(&self, owner_id: Uuid) -> AppResult<OwnerFleet> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE owner_id = $1 ORDER BY created_at",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        let vehicle_ids: Vec<Uuid> = vehicles.iter().map(|v| v.id).collect();

        let components = sqlx::query_as::<_, LiveComponent>(
            "SELECT * FROM components WHERE vehicle_id = ANY($1)",
        )
        .bind(&vehicle_ids)
        .fetch_all(&self.pool)
        .await?;

        let service_history = sqlx::query_as::<_, ServiceRecord>(
            "SELECT * FROM service_records WHERE vehicle_id = ANY($1)",
        )
        .bind(&vehicle_ids)
        .fetch_all(&self.pool)
        .await?;

        let trips = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE vehicle_id = ANY($1)")
            .bind(&vehicle_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(OwnerFleet {
            vehicles,
            components,
            service_history,
            trips,
        })
    }

    pub async fn find_snapshot(&self, owner_id: Uuid) -> AppResult<Option<FleetSnapshot>> {
        let snapshot = sqlx::query_as::<_, FleetSnapshot>(
            "SELECT * FROM fleet_snapshots WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(snapshot)
    }

    /// Crear o sobreescribir el snapshot del owner (todos los campos)
    pub async fn upsert_snapshot(&self, snapshot: &FleetSnapshot) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO fleet_snapshots (
                owner_id, total_vehicles, active_vehicles, total_drivers,
                available_drivers, total_trips, completed_trips, pending_trips,
                total_maintenance_cost, pending_maintenance_count,
                average_cost_per_trip, fleet_health_score, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (owner_id) DO UPDATE SET
                total_vehicles = EXCLUDED.total_vehicles,
                active_vehicles = EXCLUDED.active_vehicles,
                total_drivers = EXCLUDED.total_drivers,
                available_drivers = EXCLUDED.available_drivers,
                total_trips = EXCLUDED.total_trips,
                completed_trips = EXCLUDED.completed_trips,
                pending_trips = EXCLUDED.pending_trips,
                total_maintenance_cost = EXCLUDED.total_maintenance_cost,
                pending_maintenance_count = EXCLUDED.pending_maintenance_count,
                average_cost_per_trip = EXCLUDED.average_cost_per_trip,
                fleet_health_score = EXCLUDED.fleet_health_score,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(snapshot.owner_id)
        .bind(snapshot.total_vehicles)
        .bind(snapshot.active_vehicles)
        .bind(snapshot.total_drivers)
        .bind(snapshot.available_drivers)
        .bind(snapshot.total_trips)
        .bind(snapshot.completed_trips)
        .bind(snapshot.pending_trips)
        .bind(snapshot.total_maintenance_cost)
        .bind(snapshot.pending_maintenance_count)
        .bind(snapshot.average_cost_per_trip)
        .bind(snapshot.fleet_health_score)
        .bind(snapshot.created_at)
        .bind(snapshot.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
