//! Agregador de analytics de flota
//!
//! Recalcula desde cero el snapshot de un owner a partir de los registros
//! actuales de vehículos, componentes, historial de servicios y viajes.
//! Siempre es un recompute completo (sin cachés incrementales) para evitar
//! drift; es de solo-lectura sobre sus entradas.

use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::component::HealthState;
use crate::models::snapshot::{FleetSnapshot, OwnerFleet};
use crate::models::trip::TripStatus;

// Pesos del puntaje compuesto de salud de flota
const WEIGHT_ACTIVE_VEHICLES: f64 = 40.0;
const WEIGHT_COMPLETED_TRIPS: f64 = 30.0;
const WEIGHT_MAINTENANCE_DEBT: f64 = 30.0;

/// Recalcular el snapshot de la flota de un owner.
///
/// Un componente que referencia un vehículo inexistente es una
/// inconsistencia de agregación: se loggea y se omite, nunca aborta el
/// snapshot completo del owner.
pub fn aggregate(owner_id: Uuid, fleet: &OwnerFleet) -> FleetSnapshot {
    let vehicle_ids: HashSet<Uuid> = fleet.vehicles.iter().map(|v| v.id).collect();

    // Vehículos y conductores
    let total_vehicles = fleet.vehicles.len() as i64;
    let active_vehicles = fleet.vehicles.iter().filter(|v| v.is_active()).count() as i64;

    let total_drivers = fleet
        .vehicles
        .iter()
        .filter_map(|v| v.driver_id)
        .collect::<HashSet<_>>()
        .len() as i64;
    let available_drivers = fleet
        .vehicles
        .iter()
        .filter(|v| v.is_active())
        .filter_map(|v| v.driver_id)
        .collect::<HashSet<_>>()
        .len() as i64;

    // Componentes: descartar los huérfanos antes de contar
    let mut total_components: i64 = 0;
    let mut pending_maintenance_count: i64 = 0;
    for component in &fleet.components {
        if !vehicle_ids.contains(&component.vehicle_id) {
            tracing::warn!(
                component = %component.name,
                vehicle_id = %component.vehicle_id,
                "skipping component referencing an unknown vehicle during aggregation"
            );
            continue;
        }
        total_components += 1;
        if component.health_state == HealthState::MaintenanceRequired {
            pending_maintenance_count += 1;
        }
    }

    // Viajes
    let total_trips = fleet.trips.len() as i64;
    let completed_trips = fleet
        .trips
        .iter()
        .filter(|t| t.status == TripStatus::Completed)
        .count() as i64;
    let pending_trips = fleet.trips.iter().filter(|t| t.is_open()).count() as i64;

    // Costos del historial de servicios completados
    let total_maintenance_cost: Decimal = fleet
        .service_history
        .iter()
        .filter(|r| vehicle_ids.contains(&r.vehicle_id))
        .map(|r| r.cost)
        .sum();

    let average_cost_per_trip = if total_trips > 0 {
        total_maintenance_cost / Decimal::from(total_trips)
    } else {
        Decimal::ZERO
    };

    let fleet_health_score = health_score(
        active_vehicles,
        total_vehicles,
        completed_trips,
        total_trips,
        pending_maintenance_count,
        total_components,
    );

    let now = Utc::now();
    FleetSnapshot {
        owner_id,
        total_vehicles,
        active_vehicles,
        total_drivers,
        available_drivers,
        total_trips,
        completed_trips,
        pending_trips,
        total_maintenance_cost,
        pending_maintenance_count,
        average_cost_per_trip,
        fleet_health_score,
        created_at: now,
        updated_at: now,
    }
}

/// Puntaje compuesto en [0, 100]: 40% vehículos activos, 30% viajes
/// completados, 30% factor de deuda de mantenimiento (pendientes vs. total
/// de componentes rastreados). Cada término aporta 0 si su denominador es 0.
fn health_score(
    active_vehicles: i64,
    total_vehicles: i64,
    completed_trips: i64,
    total_trips: i64,
    pending_maintenance: i64,
    total_components: i64,
) -> f64 {
    let vehicles_term = if total_vehicles > 0 {
        WEIGHT_ACTIVE_VEHICLES * active_vehicles as f64 / total_vehicles as f64
    } else {
        0.0
    };

    let trips_term = if total_trips > 0 {
        WEIGHT_COMPLETED_TRIPS * completed_trips as f64 / total_trips as f64
    } else {
        0.0
    };

    let debt_term = if total_components > 0 {
        WEIGHT_MAINTENANCE_DEBT
            * (1.0 - pending_maintenance as f64 / total_components as f64)
    } else {
        0.0
    };

    (vehicles_term + trips_term + debt_term).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::component::{LiveComponent, ServiceRecord, ServiceStatus};
    use crate::models::trip::Trip;
    use crate::models::vehicle::{Vehicle, VehicleStatus};

    fn vehicle(owner_id: Uuid, status: VehicleStatus, driver: Option<Uuid>) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            owner_id,
            driver_id: driver,
            plate: "XYZ987".to_string(),
            brand: None,
            model: None,
            vehicle_status: status,
            odometer_km: 0,
            health_status: HealthState::Excellent,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn component(vehicle_id: Uuid, state: HealthState) -> LiveComponent {
        LiveComponent {
            id: Uuid::new_v4(),
            vehicle_id,
            name: "Aceite".to_string(),
            interval_km: 5000,
            accumulated_km: 0,
            last_service_odometer: 0,
            next_due_odometer: 5000,
            health_state: state,
            service_status: ServiceStatus::Operational,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn trip(vehicle_id: Uuid, status: TripStatus) -> Trip {
        Trip {
            id: Uuid::new_v4(),
            vehicle_id,
            driver_id: Uuid::new_v4(),
            origin: "Madrid".to_string(),
            destination: "Barcelona".to_string(),
            status,
            distance_km: 0,
            estimate_missing: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(vehicle_id: Uuid, cost: i64) -> ServiceRecord {
        ServiceRecord {
            id: Uuid::new_v4(),
            vehicle_id,
            component_name: "Aceite".to_string(),
            cost: Decimal::new(cost, 0),
            odometer_at_service: 0,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn empty_fleet_produces_a_zeroed_snapshot() {
        let owner = Uuid::new_v4();
        let fleet = OwnerFleet {
            vehicles: vec![],
            components: vec![],
            service_history: vec![],
            trips: vec![],
        };

        let snapshot = aggregate(owner, &fleet);

        assert_eq!(snapshot.total_vehicles, 0);
        assert_eq!(snapshot.total_trips, 0);
        // Sin viajes no hay división: el promedio es 0, nunca un panic
        assert_eq!(snapshot.average_cost_per_trip, Decimal::ZERO);
        assert_eq!(snapshot.fleet_health_score, 0.0);
    }

    #[test]
    fn counts_and_costs_are_aggregated_per_owner() {
        let owner = Uuid::new_v4();
        let driver_a = Uuid::new_v4();
        let driver_b = Uuid::new_v4();

        let v1 = vehicle(owner, VehicleStatus::Active, Some(driver_a));
        let v2 = vehicle(owner, VehicleStatus::Active, Some(driver_b));
        let v3 = vehicle(owner, VehicleStatus::Maintenance, Some(driver_b));

        let fleet = OwnerFleet {
            components: vec![
                component(v1.id, HealthState::Good),
                component(v1.id, HealthState::MaintenanceRequired),
                component(v2.id, HealthState::Excellent),
            ],
            service_history: vec![service(v1.id, 300), service(v2.id, 200)],
            trips: vec![
                trip(v1.id, TripStatus::Completed),
                trip(v1.id, TripStatus::Completed),
                trip(v2.id, TripStatus::Pending),
                trip(v2.id, TripStatus::InCourse),
                trip(v3.id, TripStatus::Rejected),
            ],
            vehicles: vec![v1, v2, v3],
        };

        let snapshot = aggregate(owner, &fleet);

        assert_eq!(snapshot.total_vehicles, 3);
        assert_eq!(snapshot.active_vehicles, 2);
        assert_eq!(snapshot.total_drivers, 2);
        assert_eq!(snapshot.available_drivers, 2);
        assert_eq!(snapshot.total_trips, 5);
        assert_eq!(snapshot.completed_trips, 2);
        assert_eq!(snapshot.pending_trips, 2);
        assert_eq!(snapshot.pending_maintenance_count, 1);
        assert_eq!(snapshot.total_maintenance_cost, Decimal::new(500, 0));
        assert_eq!(snapshot.average_cost_per_trip, Decimal::new(100, 0));
    }

    #[test]
    fn health_score_sits_between_its_dimension_contributions() {
        let owner = Uuid::new_v4();
        // 4 vehículos, 3 activos; 10 viajes, 7 completados; 2/10 componentes pendientes
        let mut vehicles: Vec<Vehicle> = (0..3)
            .map(|_| vehicle(owner, VehicleStatus::Active, None))
            .collect();
        vehicles.push(vehicle(owner, VehicleStatus::OutOfService, None));

        let mut components = Vec::new();
        for i in 0..10 {
            let state = if i < 2 {
                HealthState::MaintenanceRequired
            } else {
                HealthState::Good
            };
            components.push(component(vehicles[i % 4].id, state));
        }

        let mut trips_list = Vec::new();
        for i in 0..10 {
            let status = if i < 7 {
                TripStatus::Completed
            } else {
                TripStatus::Pending
            };
            trips_list.push(trip(vehicles[0].id, status));
        }

        let fleet = OwnerFleet {
            vehicles,
            components,
            service_history: vec![],
            trips: trips_list,
        };

        let snapshot = aggregate(owner, &fleet);

        // Dimensiones individuales escaladas a 100: 75 (vehículos), 70
        // (viajes), 80 (deuda). El compuesto cae estrictamente entre ellas.
        assert!((snapshot.fleet_health_score - 75.0).abs() < 1e-9);
        assert!(snapshot.fleet_health_score > 70.0);
        assert!(snapshot.fleet_health_score < 80.0);
        assert!(snapshot.fleet_health_score >= 0.0 && snapshot.fleet_health_score <= 100.0);
    }

    #[test]
    fn orphan_component_is_skipped_not_fatal() {
        let owner = Uuid::new_v4();
        let v1 = vehicle(owner, VehicleStatus::Active, None);
        let orphan = component(Uuid::new_v4(), HealthState::MaintenanceRequired);

        let fleet = OwnerFleet {
            components: vec![component(v1.id, HealthState::Good), orphan],
            service_history: vec![],
            trips: vec![],
            vehicles: vec![v1],
        };

        let snapshot = aggregate(owner, &fleet);

        // El huérfano no cuenta: ni como pendiente ni en el denominador
        assert_eq!(snapshot.pending_maintenance_count, 0);
        assert_eq!(snapshot.total_vehicles, 1);
        assert!(snapshot.fleet_health_score > 0.0);
    }

    #[test]
    fn aggregation_does_not_mutate_the_fleet_records() {
        let owner = Uuid::new_v4();
        let v1 = vehicle(owner, VehicleStatus::Active, None);
        let fleet = OwnerFleet {
            components: vec![component(v1.id, HealthState::Fair)],
            service_history: vec![service(v1.id, 120)],
            trips: vec![trip(v1.id, TripStatus::Completed)],
            vehicles: vec![v1],
        };
        let components_before = fleet.components.clone();

        let _ = aggregate(owner, &fleet);

        assert_eq!(fleet.components, components_before);
    }
}
