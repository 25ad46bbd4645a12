//! Proyector de riesgo de viaje
//!
//! Clasifica la viabilidad de un viaje propuesto proyectando el desgaste
//! de los componentes hacia adelante con el mismo modelo puro de desgaste.
//! Nunca muta estado: solo evalúa un futuro hipotético.

use serde::Serialize;

use crate::models::component::{HealthState, LiveComponent};
use crate::services::wear_model;

/// Umbral de advertencia sobre el porcentaje proyectado
const RISK_WARN_AT: f64 = 80.0;
/// Umbral de riesgo alto: el componente llegaría al 100% durante el viaje
const RISK_HIGH_AT: f64 = 100.0;

/// Decisión final del proyector
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum TripDecision {
    Allowed,
    Blocked,
}

/// Nivel de riesgo de una advertencia proyectada
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Medium,
    High,
}

/// Advertencia no bloqueante sobre un componente
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiskWarning {
    pub component: String,
    pub projected_percent: f64,
    /// `None` para avisos por estado actual (`Fair`); `Some` cuando el
    /// riesgo viene de la proyección de distancia.
    pub tier: Option<RiskTier>,
    pub message: String,
}

/// Veredicto estructurado del proyector
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TripRiskVerdict {
    pub decision: TripDecision,
    pub warnings: Vec<RiskWarning>,
    pub blocking_components: Vec<String>,
}

impl TripRiskVerdict {
    pub fn is_blocked(&self) -> bool {
        self.decision == TripDecision::Blocked
    }
}

/// Proyectar un viaje propuesto sobre los componentes actuales del vehículo.
///
/// Evaluación por componente, gana el peor resultado:
/// - `MaintenanceRequired` actual bloquea el viaje.
/// - `Fair` actual advierte (no bloquea): alta probabilidad de falla.
/// - `Good` cuya proyección alcanza el 80% advierte con nivel `High`
///   si llegaría al 100%, `Medium` en otro caso.
///
/// Una distancia negativa (o una estimación ausente degradada a 0 por el
/// caller) simplemente no agrega riesgo proyectado.
pub fn project_trip(components: &[LiveComponent], trip_distance_km: i64) -> TripRiskVerdict {
    let distance = trip_distance_km.max(0);
    let mut warnings = Vec::new();
    let mut blocking_components = Vec::new();

    for component in components {
        let projected = wear_model::projected_percent(
            component.accumulated_km,
            component.interval_km,
            distance,
        );

        match component.health_state {
            HealthState::MaintenanceRequired => {
                blocking_components.push(component.name.clone());
            }
            HealthState::Fair => {
                warnings.push(RiskWarning {
                    component: component.name.clone(),
                    projected_percent: projected,
                    tier: None,
                    message: format!(
                        "The component {} is in fair condition and has a high likelihood \
                         of failing during the trip",
                        component.name
                    ),
                });
            }
            HealthState::Good if projected >= RISK_WARN_AT => {
                let tier = if projected >= RISK_HIGH_AT {
                    RiskTier::High
                } else {
                    RiskTier::Medium
                };
                warnings.push(RiskWarning {
                    component: component.name.clone(),
                    projected_percent: projected,
                    tier: Some(tier),
                    message: format!(
                        "The component {} would reach {:.1}% of its maintenance interval \
                         during the trip",
                        component.name, projected
                    ),
                });
            }
            _ => {}
        }
    }

    let decision = if blocking_components.is_empty() {
        TripDecision::Allowed
    } else {
        TripDecision::Blocked
    };

    TripRiskVerdict {
        decision,
        warnings,
        blocking_components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::component::ServiceStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn component(name: &str, interval_km: i64, accumulated_km: i64) -> LiveComponent {
        let state = wear_model::classify(accumulated_km, interval_km).unwrap().state;
        LiveComponent {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            name: name.to_string(),
            interval_km,
            accumulated_km,
            last_service_odometer: 0,
            next_due_odometer: interval_km,
            health_state: state,
            service_status: ServiceStatus::Operational,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn safe_components_allow_without_warnings() {
        let components = vec![
            component("Aceite", 5000, 1000),
            component("Filtros", 10_000, 2000),
        ];

        let verdict = project_trip(&components, 2000);

        assert_eq!(verdict.decision, TripDecision::Allowed);
        assert!(verdict.warnings.is_empty());
        assert!(verdict.blocking_components.is_empty());
    }

    #[test]
    fn maintenance_required_blocks_and_lists_the_component() {
        let components = vec![
            component("Frenos", 5000, 5000),
            component("Aceite", 5000, 100),
        ];

        let verdict = project_trip(&components, 100);

        assert_eq!(verdict.decision, TripDecision::Blocked);
        assert_eq!(verdict.blocking_components, vec!["Frenos".to_string()]);
    }

    #[test]
    fn projected_overrun_warns_high_but_allows() {
        // 500/1000 = 50% (Good); con 600 km más llegaría a 110%
        let components = vec![component("Aceite", 1000, 500)];

        let verdict = project_trip(&components, 600);

        assert_eq!(verdict.decision, TripDecision::Allowed);
        assert_eq!(verdict.warnings.len(), 1);
        let warning = &verdict.warnings[0];
        assert_eq!(warning.tier, Some(RiskTier::High));
        assert!((warning.projected_percent - 110.0).abs() < 1e-9);
    }

    #[test]
    fn projected_risk_below_100_is_medium() {
        // 6232/9500 = 65.6% (Good); con 1500 km más llegaría a 81.4%
        let components = vec![component("Frenos", 9500, 6232)];

        let verdict = project_trip(&components, 1500);

        assert_eq!(verdict.decision, TripDecision::Allowed);
        assert_eq!(verdict.warnings[0].tier, Some(RiskTier::Medium));
    }

    #[test]
    fn fair_component_warns_without_blocking() {
        let components = vec![component("Inyecciones", 8000, 6800)]; // 85%

        let verdict = project_trip(&components, 50);

        assert_eq!(verdict.decision, TripDecision::Allowed);
        assert_eq!(verdict.warnings.len(), 1);
        assert_eq!(verdict.warnings[0].tier, None);
    }

    #[test]
    fn short_trip_on_good_component_adds_no_warning() {
        // 6232/9500 con 1000 km más: 76.1%, debajo del umbral
        let components = vec![component("Frenos", 9500, 6232)];

        let verdict = project_trip(&components, 1000);

        assert_eq!(verdict.decision, TripDecision::Allowed);
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn projector_never_mutates_its_inputs() {
        let components = vec![
            component("Aceite", 1000, 950),
            component("Frenos", 9500, 9500),
        ];
        let before = components.clone();

        let _ = project_trip(&components, 10_000);

        assert_eq!(components, before);
    }

    #[test]
    fn missing_estimate_degrades_to_zero_distance() {
        let components = vec![component("Aceite", 1000, 500)];

        let verdict = project_trip(&components, 0);

        assert_eq!(verdict.decision, TripDecision::Allowed);
        assert!(verdict.warnings.is_empty());
    }
}
