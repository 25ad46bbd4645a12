//! DTOs de viajes

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::trip::{Trip, TripStatus};
use crate::services::trip_risk_service::RiskWarning;

/// Request para crear un viaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    #[validate(length(min = 2, max = 200))]
    pub origin: String,

    #[validate(length(min = 2, max = 200))]
    pub destination: String,

    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
}

/// Request para reportar la finalización de un viaje
///
/// `distance_km` ausente se trata como 0 (el pipeline nunca rechaza la
/// finalización por una medición faltante o negativa).
#[derive(Debug, Deserialize)]
pub struct CompleteTripRequest {
    #[serde(default)]
    pub distance_km: Option<i64>,
}

/// Request para mover el estado de un viaje (Pending -> InCourse)
#[derive(Debug, Deserialize)]
pub struct UpdateTripStatusRequest {
    pub status: TripStatus,
}

/// Response al crear un viaje: incluye la estimación de distancia y las
/// advertencias no bloqueantes del proyector de riesgo
#[derive(Debug, Serialize)]
pub struct TripCreatedResponse {
    pub trip_id: String,
    pub status: String,
    pub estimated_distance_km: i64,
    pub estimate_missing: bool,
    pub estimated_duration: Option<String>,
    pub warnings: Vec<RiskWarning>,
}

/// Response de viaje para la API
#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: String,
    pub vehicle_id: String,
    pub driver_id: String,
    pub origin: String,
    pub destination: String,
    pub status: String,
    pub distance_km: i64,
    pub estimate_missing: bool,
    pub created_at: String,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id.to_string(),
            vehicle_id: trip.vehicle_id.to_string(),
            driver_id: trip.driver_id.to_string(),
            origin: trip.origin,
            destination: trip.destination,
            status: format!("{:?}", trip.status),
            distance_km: trip.distance_km,
            estimate_missing: trip.estimate_missing,
            created_at: trip.created_at.to_rfc3339(),
        }
    }
}
