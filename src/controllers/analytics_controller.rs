//! Controller de analytics de flota

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::analytics_dto::FleetSnapshotResponse;
use crate::models::snapshot::FleetSnapshot;
use crate::repositories::fleet_repository::FleetRepository;
use crate::services::fleet_analytics_service;
use crate::utils::errors::AppResult;

/// Recalcular y persistir el snapshot de un owner.
///
/// Helper compartido: lo invocan también los controllers de viajes,
/// mantenimiento y vehículos después de mutar la flota.
pub async fn refresh_owner_snapshot(pool: &PgPool, owner_id: Uuid) -> AppResult<FleetSnapshot> {
    let repository = FleetRepository::new(pool.clone());

    let fleet = repository.load_owner_fleet(owner_id).await?;
    let snapshot = fleet_analytics_service::aggregate(owner_id, &fleet);
    repository.upsert_snapshot(&snapshot).await?;

    Ok(snapshot)
}

pub struct AnalyticsController {
    repository: FleetRepository,
    pool: PgPool,
}

impl AnalyticsController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FleetRepository::new(pool.clone()),
            pool,
        }
    }

    /// Obtener el snapshot del owner; si aún no existe se calcula una vez
    pub async fn get_snapshot(&self, owner_id: Uuid) -> AppResult<FleetSnapshotResponse> {
        let snapshot = match self.repository.find_snapshot(owner_id).await? {
            Some(snapshot) => snapshot,
            None => refresh_owner_snapshot(&self.pool, owner_id).await?,
        };

        Ok(FleetSnapshotResponse::from(snapshot))
    }

    /// Forzar el recálculo completo de las métricas del owner
    pub async fn refresh(&self, owner_id: Uuid) -> AppResult<FleetSnapshotResponse> {
        let snapshot = refresh_owner_snapshot(&self.pool, owner_id).await?;
        Ok(FleetSnapshotResponse::from(snapshot))
    }
}
