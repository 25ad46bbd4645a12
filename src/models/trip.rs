//! Modelo de Trip
//!
//! Completar un viaje es el único evento que incrementa el odómetro del
//! vehículo y el desgaste acumulado de sus componentes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del viaje - mapea al ENUM trip_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "trip_status", rename_all = "snake_case")]
pub enum TripStatus {
    Pending,
    InCourse,
    Completed,
    Rejected,
}

/// Trip principal - mapea exactamente a la tabla trips
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub status: TripStatus,
    /// Distancia real recorrida; 0 hasta que el viaje se completa.
    pub distance_km: i64,
    /// true cuando el colaborador de distancias no estuvo disponible al
    /// crear el viaje y se continuó con una estimación de 0 km.
    pub estimate_missing: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Un viaje cuenta como pendiente para analytics mientras no termine.
    pub fn is_open(&self) -> bool {
        matches!(self.status, TripStatus::Pending | TripStatus::InCourse)
    }
}
