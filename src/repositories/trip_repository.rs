//! Repositorio de viajes

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::trip::{Trip, TripStatus};
use crate::utils::errors::AppResult;

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, trip: &Trip) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO trips (
                id, vehicle_id, driver_id, origin, destination, status,
                distance_km, estimate_missing, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(trip.id)
        .bind(trip.vehicle_id)
        .bind(trip.driver_id)
        .bind(&trip.origin)
        .bind(&trip.destination)
        .bind(trip.status)
        .bind(trip.distance_km)
        .bind(trip.estimate_missing)
        .bind(trip.created_at)
        .bind(trip.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Trip>> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    pub async fn update_status(&self, id: Uuid, status: TripStatus) -> AppResult<()> {
        sqlx::query("UPDATE trips SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Marcar un viaje como completado con la distancia real recorrida
    pub async fn complete(&self, id: Uuid, distance_km: i64) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE trips
            SET status = $2, distance_km = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(TripStatus::Completed)
        .bind(distance_km)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
