//! Repositorio de vehículos y componentes
//!
//! El contrato clave del pipeline es `save_vehicle_and_components`: el
//! vehículo y todos sus componentes se escriben en una sola transacción,
//! de modo que nunca sea observable una actualización parcial.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::component::{LiveComponent, ServiceRecord};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un vehículo nuevo junto con sus componentes iniciales
    pub async fn create_with_components(
        &self,
        vehicle: &Vehicle,
        components: &[LiveComponent],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO vehicles (
                id, owner_id, driver_id, plate, brand, model,
                vehicle_status, odometer_km, health_status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.owner_id)
        .bind(vehicle.driver_id)
        .bind(&vehicle.plate)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.vehicle_status)
        .bind(vehicle.odometer_km)
        .bind(vehicle.health_status)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .execute(&mut *tx)
        .await?;

        for component in components {
            sqlx::query(
                r#"
                INSERT INTO components (
                    id, vehicle_id, name, interval_km, accumulated_km,
                    last_service_odometer, next_due_odometer, health_state,
                    service_status, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(component.id)
            .bind(component.vehicle_id)
            .bind(&component.name)
            .bind(component.interval_km)
            .bind(component.accumulated_km)
            .bind(component.last_service_odometer)
            .bind(component.next_due_odometer)
            .bind(component.health_state)
            .bind(component.service_status)
            .bind(component.created_at)
            .bind(component.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn plate_exists(&self, plate: &str, owner_id: Uuid) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1 AND owner_id = $2)",
        )
        .bind(plate)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn find_components(&self, vehicle_id: Uuid) -> AppResult<Vec<LiveComponent>> {
        let components = sqlx::query_as::<_, LiveComponent>(
            "SELECT * FROM components WHERE vehicle_id = $1 ORDER BY created_at",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(components)
    }

    pub async fn find_component(&self, component_id: Uuid) -> AppResult<Option<LiveComponent>> {
        let component =
            sqlx::query_as::<_, LiveComponent>("SELECT * FROM components WHERE id = $1")
                .bind(component_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(component)
    }

    /// Cargar un vehículo con su set completo de componentes
    pub async fn load_vehicle_with_components(
        &self,
        id: Uuid,
    ) -> AppResult<Option<(Vehicle, Vec<LiveComponent>)>> {
        let vehicle = match self.find_by_id(id).await? {
            Some(vehicle) => vehicle,
            None => return Ok(None),
        };
        let components = self.find_components(id).await?;

        Ok(Some((vehicle, components)))
    }

    /// Persistir el vehículo y todos sus componentes en una transacción.
    /// La exclusión mutua por vehículo del pipeline vive aquí: leer
    /// componentes, reclasificar y escribir es un solo commit.
    pub async fn save_vehicle_and_components(
        &self,
        vehicle: &Vehicle,
        components: &[LiveComponent],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE vehicles
            SET driver_id = $2, odometer_km = $3, health_status = $4,
                vehicle_status = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.driver_id)
        .bind(vehicle.odometer_km)
        .bind(vehicle.health_status)
        .bind(vehicle.vehicle_status)
        .bind(vehicle.updated_at)
        .execute(&mut *tx)
        .await?;

        for component in components {
            sqlx::query(
                r#"
                UPDATE components
                SET accumulated_km = $2, last_service_odometer = $3,
                    next_due_odometer = $4, health_state = $5,
                    service_status = $6, updated_at = $7
                WHERE id = $1
                "#,
            )
            .bind(component.id)
            .bind(component.accumulated_km)
            .bind(component.last_service_odometer)
            .bind(component.next_due_odometer)
            .bind(component.health_state)
            .bind(component.service_status)
            .bind(component.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Insertar una entrada inmutable del historial de servicios
    pub async fn insert_service_record(&self, record: &ServiceRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO service_records (
                id, vehicle_id, component_name, cost, odometer_at_service, completed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(record.vehicle_id)
        .bind(&record.component_name)
        .bind(record.cost)
        .bind(record.odometer_at_service)
        .bind(record.completed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
