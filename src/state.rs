//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::distance_service::DistanceEstimator;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub distance_estimator: Arc<dyn DistanceEstimator>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        distance_estimator: Arc<dyn DistanceEstimator>,
    ) -> Self {
        Self {
            pool,
            config,
            distance_estimator,
        }
    }
}
