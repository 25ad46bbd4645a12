//! Pipeline de actualización por odómetro
//!
//! Se dispara exactamente una vez por viaje completado: suma la distancia
//! medida al vehículo y a cada componente, reclasifica el desgaste y
//! deriva la salud agregada del vehículo. También implementa la operación
//! separada de completar un servicio (aprobación/rechazo).
//!
//! Todas las funciones son síncronas y puras sobre los modelos en memoria;
//! la persistencia atómica es responsabilidad del caller (repositorio).

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::component::{
    HealthState, LiveComponent, ServiceDecision, ServiceRecord, ServiceStatus,
};
use crate::models::vehicle::Vehicle;
use crate::services::wear_model;
use crate::utils::errors::{AppError, AppResult};

/// Salud agregada del vehículo: el peor estado entre sus componentes.
/// Sin componentes no hay desgaste rastreado, así que `Excellent`.
pub fn aggregate_health(components: &[LiveComponent]) -> HealthState {
    components
        .iter()
        .map(|c| c.health_state)
        .max()
        .unwrap_or(HealthState::Excellent)
}

/// Aplicar la distancia de un viaje completado al vehículo y sus componentes.
///
/// La distancia reportada se recorta a >= 0 (una medición negativa se trata
/// como 0, nunca se rechaza). Un componente que llega al 100% queda marcado
/// `MaintenanceRequired`; el reset es una acción explícita aparte
/// (`complete_service`), nunca implícito aquí.
pub fn apply_trip_distance(
    vehicle: &mut Vehicle,
    components: &mut [LiveComponent],
    reported_km: i64,
) -> AppResult<()> {
    let distance = reported_km.max(0);
    let now = Utc::now();

    vehicle.odometer_km += distance;

    for component in components.iter_mut() {
        component.accumulated_km += distance;
        let reading = wear_model::classify(component.accumulated_km, component.interval_km)?;
        component.health_state = reading.state;
        component.updated_at = now;
    }

    vehicle.health_status = aggregate_health(components);
    vehicle.updated_at = now;

    Ok(())
}

/// Completar (o rechazar) el servicio de un componente.
///
/// Con aprobación: el desgaste vuelve a 0, el componente queda `Excellent`,
/// `next_due = odómetro actual + intervalo`, y se devuelve el registro
/// inmutable de historial con el costo facturado. Con rechazo solo cambia
/// el estado administrativo; los contadores de desgaste no se tocan.
pub fn complete_service(
    vehicle: &mut Vehicle,
    components: &mut [LiveComponent],
    component_id: Uuid,
    decision: ServiceDecision,
    cost: Decimal,
) -> AppResult<Option<ServiceRecord>> {
    let now = Utc::now();

    let component = components
        .iter_mut()
        .find(|c| c.id == component_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Component '{}' not found on vehicle", component_id))
        })?;

    match decision {
        ServiceDecision::Rejected => {
            component.service_status = ServiceStatus::ServiceRejected;
            component.updated_at = now;
            Ok(None)
        }
        ServiceDecision::Approved => {
            if cost <= Decimal::ZERO {
                return Err(AppError::Validation(
                    "service cost must be greater than zero".to_string(),
                ));
            }

            component.accumulated_km = 0;
            component.last_service_odometer = vehicle.odometer_km;
            component.next_due_odometer = component.last_service_odometer + component.interval_km;
            component.health_state = HealthState::Excellent;
            component.service_status = ServiceStatus::Operational;
            component.updated_at = now;

            let record = ServiceRecord {
                id: Uuid::new_v4(),
                vehicle_id: vehicle.id,
                component_name: component.name.clone(),
                cost,
                odometer_at_service: vehicle.odometer_km,
                completed_at: now,
            };

            vehicle.health_status = aggregate_health(components);
            vehicle.updated_at = now;

            Ok(Some(record))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleStatus;

    fn test_vehicle() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            driver_id: None,
            plate: "ABC123".to_string(),
            brand: Some("Test Brand".to_string()),
            model: Some("Test Model".to_string()),
            vehicle_status: VehicleStatus::Active,
            odometer_km: 0,
            health_status: HealthState::Excellent,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_component(vehicle: &Vehicle, name: &str, interval_km: i64) -> LiveComponent {
        LiveComponent {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id,
            name: name.to_string(),
            interval_km,
            accumulated_km: 0,
            last_service_odometer: vehicle.odometer_km,
            next_due_odometer: vehicle.odometer_km + interval_km,
            health_state: HealthState::Excellent,
            service_status: ServiceStatus::Operational,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn distance_accumulates_and_reclassifies() {
        let mut vehicle = test_vehicle();
        let mut components = vec![test_component(&vehicle, "Aceite", 1000)];

        apply_trip_distance(&mut vehicle, &mut components, 500).unwrap();

        assert_eq!(vehicle.odometer_km, 500);
        assert_eq!(components[0].accumulated_km, 500);
        assert_eq!(components[0].health_state, HealthState::Good);
        assert_eq!(vehicle.health_status, HealthState::Good);
    }

    #[test]
    fn split_distances_match_single_application() {
        let mut v1 = test_vehicle();
        let mut c1 = vec![test_component(&v1, "Aceite", 1000)];
        apply_trip_distance(&mut v1, &mut c1, 300).unwrap();
        apply_trip_distance(&mut v1, &mut c1, 450).unwrap();

        let mut v2 = test_vehicle();
        let mut c2 = vec![test_component(&v2, "Aceite", 1000)];
        apply_trip_distance(&mut v2, &mut c2, 750).unwrap();

        assert_eq!(v1.odometer_km, v2.odometer_km);
        assert_eq!(c1[0].accumulated_km, c2[0].accumulated_km);
        assert_eq!(c1[0].health_state, c2[0].health_state);
    }

    #[test]
    fn negative_distance_is_treated_as_zero() {
        let mut vehicle = test_vehicle();
        let mut components = vec![test_component(&vehicle, "Frenos", 9500)];

        apply_trip_distance(&mut vehicle, &mut components, -250).unwrap();

        assert_eq!(vehicle.odometer_km, 0);
        assert_eq!(components[0].accumulated_km, 0);
        assert_eq!(components[0].health_state, HealthState::Excellent);
    }

    #[test]
    fn due_component_forces_vehicle_maintenance_required() {
        let mut vehicle = test_vehicle();
        let mut components = vec![
            test_component(&vehicle, "Aceite", 1000),
            test_component(&vehicle, "Neumático", 12_000),
        ];

        apply_trip_distance(&mut vehicle, &mut components, 1000).unwrap();

        assert_eq!(components[0].health_state, HealthState::MaintenanceRequired);
        // El componente vencido NO se resetea implícitamente
        assert_eq!(components[0].accumulated_km, 1000);
        assert_eq!(vehicle.health_status, HealthState::MaintenanceRequired);
    }

    #[test]
    fn vehicle_without_components_is_excellent() {
        let mut vehicle = test_vehicle();
        let mut components: Vec<LiveComponent> = vec![];

        apply_trip_distance(&mut vehicle, &mut components, 5000).unwrap();

        assert_eq!(vehicle.odometer_km, 5000);
        assert_eq!(vehicle.health_status, HealthState::Excellent);
    }

    #[test]
    fn approved_service_resets_wear_and_logs_history() {
        let mut vehicle = test_vehicle();
        let mut components = vec![test_component(&vehicle, "Aceite", 1000)];
        apply_trip_distance(&mut vehicle, &mut components, 1200).unwrap();
        let component_id = components[0].id;

        let record = complete_service(
            &mut vehicle,
            &mut components,
            component_id,
            ServiceDecision::Approved,
            Decimal::new(350, 0),
        )
        .unwrap()
        .expect("approval must produce a service record");

        assert_eq!(components[0].accumulated_km, 0);
        assert_eq!(components[0].health_state, HealthState::Excellent);
        assert_eq!(components[0].last_service_odometer, 1200);
        assert_eq!(components[0].next_due_odometer, 2200);
        assert_eq!(vehicle.health_status, HealthState::Excellent);
        assert_eq!(record.component_name, "Aceite");
        assert_eq!(record.odometer_at_service, 1200);
    }

    #[test]
    fn double_approval_is_idempotent_on_state() {
        let mut vehicle = test_vehicle();
        let mut components = vec![test_component(&vehicle, "Frenos", 9500)];
        apply_trip_distance(&mut vehicle, &mut components, 9600).unwrap();
        let component_id = components[0].id;

        for _ in 0..2 {
            complete_service(
                &mut vehicle,
                &mut components,
                component_id,
                ServiceDecision::Approved,
                Decimal::new(100, 0),
            )
            .unwrap();

            assert_eq!(components[0].accumulated_km, 0);
            assert_eq!(components[0].health_state, HealthState::Excellent);
        }
    }

    #[test]
    fn rejection_changes_only_the_administrative_status() {
        let mut vehicle = test_vehicle();
        let mut components = vec![test_component(&vehicle, "Inyecciones", 8000)];
        apply_trip_distance(&mut vehicle, &mut components, 8500).unwrap();
        let component_id = components[0].id;

        let record = complete_service(
            &mut vehicle,
            &mut components,
            component_id,
            ServiceDecision::Rejected,
            Decimal::ZERO,
        )
        .unwrap();

        assert!(record.is_none());
        assert_eq!(components[0].service_status, ServiceStatus::ServiceRejected);
        assert_eq!(components[0].accumulated_km, 8500);
        assert_eq!(components[0].health_state, HealthState::MaintenanceRequired);
    }

    #[test]
    fn approval_requires_a_positive_cost() {
        let mut vehicle = test_vehicle();
        let mut components = vec![test_component(&vehicle, "Aceite", 1000)];
        let component_id = components[0].id;

        let result = complete_service(
            &mut vehicle,
            &mut components,
            component_id,
            ServiceDecision::Approved,
            Decimal::ZERO,
        );

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn unknown_component_is_not_found() {
        let mut vehicle = test_vehicle();
        let mut components = vec![test_component(&vehicle, "Aceite", 1000)];

        let result = complete_service(
            &mut vehicle,
            &mut components,
            Uuid::new_v4(),
            ServiceDecision::Approved,
            Decimal::new(50, 0),
        );

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
