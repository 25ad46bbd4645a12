//! Controller de viajes
//!
//! La creación consulta al proyector de riesgo antes de confirmar; la
//! finalización es el único evento que empuja distancia hacia el pipeline
//! del odómetro.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::analytics_controller::refresh_owner_snapshot;
use crate::dto::trip_dto::{
    CompleteTripRequest, CreateTripRequest, TripCreatedResponse, TripResponse,
    UpdateTripStatusRequest,
};
use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::trip::{Trip, TripStatus};
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::distance_service::DistanceEstimator;
use crate::services::{odometer_service, trip_risk_service};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Response al completar un viaje
#[derive(Debug, serde::Serialize)]
pub struct CompleteTripResponse {
    pub trip: TripResponse,
    pub vehicle: VehicleResponse,
}

pub struct TripController {
    trips: TripRepository,
    vehicles: VehicleRepository,
    estimator: Arc<dyn DistanceEstimator>,
    pool: PgPool,
}

impl TripController {
    pub fn new(pool: PgPool, estimator: Arc<dyn DistanceEstimator>) -> Self {
        Self {
            trips: TripRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            estimator,
            pool,
        }
    }

    /// Crear un viaje, sujeto al veredicto del proyector de riesgo.
    ///
    /// Si el colaborador de distancias falla, el viaje procede con una
    /// estimación de 0 km y la bandera `estimate_missing` para el caller.
    pub async fn create_trip(
        &self,
        owner_id: Uuid,
        request: CreateTripRequest,
    ) -> AppResult<TripCreatedResponse> {
        request.validate()?;

        let (vehicle, components) = self
            .vehicles
            .load_vehicle_with_components(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if vehicle.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "Vehicle does not belong to this owner".to_string(),
            ));
        }

        let (distance_km, estimate_missing, duration) = match self
            .estimator
            .estimate_distance(&request.origin, &request.destination)
            .await
        {
            Ok(estimate) => (estimate.distance_km, false, estimate.duration),
            Err(e) => {
                tracing::warn!(
                    "distance estimate unavailable for {} -> {}: {}; proceeding with 0 km",
                    request.origin,
                    request.destination,
                    e
                );
                (0, true, None)
            }
        };

        let verdict = trip_risk_service::project_trip(&components, distance_km);
        if verdict.is_blocked() {
            return Err(AppError::TripBlocked {
                components: verdict.blocking_components,
            });
        }

        let now = Utc::now();
        let trip = Trip {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id,
            driver_id: request.driver_id,
            origin: request.origin,
            destination: request.destination,
            status: TripStatus::Pending,
            distance_km: 0,
            estimate_missing,
            created_at: now,
            updated_at: now,
        };
        self.trips.create(&trip).await?;

        Ok(TripCreatedResponse {
            trip_id: trip.id.to_string(),
            status: format!("{:?}", trip.status),
            estimated_distance_km: distance_km,
            estimate_missing,
            estimated_duration: duration,
            warnings: verdict.warnings,
        })
    }

    /// Reportar la finalización de un viaje con la distancia medida.
    ///
    /// Dispara el pipeline del odómetro una única vez y persiste vehículo
    /// + componentes en una transacción; después refresca el snapshot.
    pub async fn complete_trip(
        &self,
        owner_id: Uuid,
        trip_id: Uuid,
        request: CompleteTripRequest,
    ) -> AppResult<CompleteTripResponse> {
        let trip = self
            .trips
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

        if !trip.is_open() {
            return Err(AppError::Conflict(format!(
                "Trip cannot be completed from status {:?}",
                trip.status
            )));
        }

        let (mut vehicle, mut components) = self
            .vehicles
            .load_vehicle_with_components(trip.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if vehicle.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "Trip does not belong to this owner".to_string(),
            ));
        }

        // Medición ausente o negativa: se trata como 0, nunca se rechaza
        let distance_km = request.distance_km.unwrap_or(0).max(0);

        odometer_service::apply_trip_distance(&mut vehicle, &mut components, distance_km)?;
        self.vehicles
            .save_vehicle_and_components(&vehicle, &components)
            .await?;
        self.trips.complete(trip_id, distance_km).await?;

        refresh_owner_snapshot(&self.pool, vehicle.owner_id).await?;

        let completed = Trip {
            status: TripStatus::Completed,
            distance_km,
            ..trip
        };

        Ok(CompleteTripResponse {
            trip: TripResponse::from(completed),
            vehicle: VehicleResponse::from(vehicle),
        })
    }

    /// Mover el estado de un viaje (por ejemplo Pending -> InCourse).
    /// La finalización tiene su propio endpoint porque dispara el pipeline.
    pub async fn update_status(
        &self,
        trip_id: Uuid,
        request: UpdateTripStatusRequest,
    ) -> AppResult<TripResponse> {
        let trip = self
            .trips
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

        if request.status == TripStatus::Completed {
            return Err(AppError::Validation(
                "trip completion must go through the completion endpoint".to_string(),
            ));
        }
        if !trip.is_open() {
            return Err(AppError::Conflict(format!(
                "Trip status cannot change from {:?}",
                trip.status
            )));
        }

        self.trips.update_status(trip_id, request.status).await?;

        let updated = Trip {
            status: request.status,
            ..trip
        };
        Ok(TripResponse::from(updated))
    }

    pub async fn get_by_id(&self, trip_id: Uuid) -> AppResult<TripResponse> {
        let trip = self
            .trips
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &trip_id.to_string()))?;

        Ok(TripResponse::from(trip))
    }
}
