//! Modelo de desgaste de componentes
//!
//! Función pura que mapea distancia acumulada + intervalo de mantenimiento
//! a un estado de salud y porcentaje consumido. No tiene dependencias ni
//! efectos secundarios; todo lo demás del pipeline se apoya en ella.

use crate::models::component::HealthState;
use crate::utils::errors::{AppError, AppResult};

/// Lectura de desgaste producida por `classify`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WearReading {
    pub state: HealthState,
    pub percent_consumed: f64,
}

// Umbrales de la partición de cinco bandas, en porcentaje consumido.
// Las bandas son contiguas y estrictamente ascendentes: un componente nunca
// vuelve a un estado más sano al acumular distancia. Los cortes de Fair (80)
// y Maintenance Required (100) son los que usa el proyector de riesgo.
const VERY_GOOD_AT: f64 = 20.0;
const GOOD_AT: f64 = 40.0;
const FAIR_AT: f64 = 80.0;
const MAINTENANCE_AT: f64 = 100.0;

/// Clasificar el desgaste de un componente.
///
/// `interval_km == 0` es el caso degenerado de un componente sin desgaste
/// rastreado: siempre `Excellent` / 0%. Un componente recién servido
/// (`accumulated_km == 0`) también es `Excellent` sin evaluar la fórmula.
pub fn classify(accumulated_km: i64, interval_km: i64) -> AppResult<WearReading> {
    if accumulated_km < 0 {
        return Err(AppError::Validation(format!(
            "accumulated distance cannot be negative: {}",
            accumulated_km
        )));
    }
    if interval_km < 0 {
        return Err(AppError::Validation(format!(
            "maintenance interval cannot be negative: {}",
            interval_km
        )));
    }

    if interval_km == 0 || accumulated_km == 0 {
        return Ok(WearReading {
            state: HealthState::Excellent,
            percent_consumed: 0.0,
        });
    }

    let percent = accumulated_km as f64 / interval_km as f64 * 100.0;

    let state = if percent >= MAINTENANCE_AT {
        HealthState::MaintenanceRequired
    } else if percent >= FAIR_AT {
        HealthState::Fair
    } else if percent >= GOOD_AT {
        HealthState::Good
    } else if percent >= VERY_GOOD_AT {
        HealthState::VeryGood
    } else {
        HealthState::Excellent
    };

    Ok(WearReading {
        state,
        percent_consumed: percent,
    })
}

/// Porcentaje que alcanzaría un componente tras sumarle una distancia
/// hipotética, sin mutar nada. Para `interval_km == 0` devuelve 0.
pub fn projected_percent(accumulated_km: i64, interval_km: i64, extra_km: i64) -> f64 {
    if interval_km <= 0 {
        return 0.0;
    }
    (accumulated_km + extra_km).max(0) as f64 / interval_km as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_component_is_excellent() {
        let reading = classify(0, 5000).unwrap();
        assert_eq!(reading.state, HealthState::Excellent);
        assert_eq!(reading.percent_consumed, 0.0);
    }

    #[test]
    fn at_or_past_interval_requires_maintenance() {
        assert_eq!(
            classify(5000, 5000).unwrap().state,
            HealthState::MaintenanceRequired
        );
        assert_eq!(
            classify(11_000, 5000).unwrap().state,
            HealthState::MaintenanceRequired
        );
    }

    #[test]
    fn bands_cover_the_whole_range_in_order() {
        let expected = [
            (100, HealthState::Excellent),          // 10%
            (250, HealthState::VeryGood),           // 25%
            (500, HealthState::Good),               // 50%
            (700, HealthState::Good),               // 70%
            (850, HealthState::Fair),               // 85%
            (1000, HealthState::MaintenanceRequired), // 100%
        ];
        for (km, state) in expected {
            assert_eq!(classify(km, 1000).unwrap().state, state, "a {} km", km);
        }
    }

    #[test]
    fn degradation_is_monotonic() {
        // Al crecer la distancia el estado nunca regresa a uno más sano.
        let mut previous = HealthState::Excellent;
        for km in (0..=1500).step_by(50) {
            let state = classify(km, 1000).unwrap().state;
            assert!(state >= previous, "regresión en {} km: {:?} -> {:?}", km, previous, state);
            previous = state;
        }
    }

    #[test]
    fn untracked_interval_is_always_excellent() {
        let reading = classify(87_500, 0).unwrap();
        assert_eq!(reading.state, HealthState::Excellent);
        assert_eq!(reading.percent_consumed, 0.0);
    }

    #[test]
    fn negative_inputs_are_rejected() {
        assert!(classify(-1, 1000).is_err());
        assert!(classify(100, -5).is_err());
    }

    #[test]
    fn projected_percent_handles_degenerate_interval() {
        assert_eq!(projected_percent(500, 0, 600), 0.0);
        assert!((projected_percent(500, 1000, 600) - 110.0).abs() < f64::EPSILON);
    }
}
