mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use services::distance_service::GoogleDistanceService;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Fleet Maintenance - Tracking de flota y mantenimiento");
    info!("========================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    info!("✅ Base de datos conectada exitosamente");

    // Colaborador de distancias (Google Distance Matrix)
    let api_key = match &config.google_maps_api_key {
        Some(key) => key.clone(),
        None => {
            info!("⚠️ GOOGLE_MAPS_API_KEY no configurada; las estimaciones de distancia fallarán y los viajes se crearán con 0 km marcados");
            String::new()
        }
    };
    let distance_estimator = Arc::new(GoogleDistanceService::new(api_key));

    let cors = if config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config.clone(), distance_estimator);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/trip", routes::trip_routes::create_trip_router())
        .nest(
            "/api/maintenance",
            routes::maintenance_routes::create_maintenance_router(),
        )
        .nest("/api/fleet", routes::analytics_routes::create_analytics_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET   /health - Health check");
    info!("🚗 Vehículos:");
    info!("   POST  /api/vehicle - Crear vehículo con componentes");
    info!("   GET   /api/vehicle - Listar vehículos del owner");
    info!("   GET   /api/vehicle/:id - Obtener vehículo");
    info!("   GET   /api/vehicle/:id/components - Salud de componentes");
    info!("🧭 Viajes:");
    info!("   POST  /api/trip - Crear viaje (con proyección de riesgo)");
    info!("   GET   /api/trip/:id - Obtener viaje");
    info!("   PATCH /api/trip/:id - Actualizar estado del viaje");
    info!("   PATCH /api/trip/:id/complete - Completar viaje con distancia");
    info!("🔧 Mantenimiento:");
    info!("   PATCH /api/maintenance/:component_id/approve - Aprobar/rechazar servicio");
    info!("📊 Analytics:");
    info!("   GET   /api/fleet/analytics - Snapshot de la flota");
    info!("   PUT   /api/fleet/analytics/refresh - Recalcular métricas");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de health check
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-maintenance",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
