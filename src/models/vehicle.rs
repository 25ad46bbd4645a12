//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD
//! operations. Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::component::HealthState;

/// Estado administrativo del vehículo - mapea al ENUM vehicle_status
///
/// Es el ciclo de vida operativo (lo fija el owner); no confundir con
/// `health_status`, que se deriva siempre de los componentes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Maintenance,
    OutOfService,
    Retired,
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vehicle_status: VehicleStatus,
    /// Odómetro en km; no-negativo y monotónicamente no-decreciente.
    /// Solo lo muta el pipeline de actualización por viaje completado.
    pub odometer_km: i64,
    /// Salud agregada: el peor estado entre los componentes del vehículo.
    /// Derivado, nunca se asigna directamente desde la API.
    pub health_status: HealthState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn is_active(&self) -> bool {
        self.vehicle_status == VehicleStatus::Active
    }
}
