//! Routers de la API

pub mod analytics_routes;
pub mod maintenance_routes;
pub mod trip_routes;
pub mod vehicle_routes;

use uuid::Uuid;

// TODO: Extraer owner_id del token cuando se integre el middleware de auth.
// La verificación de capacidad ocurre una sola vez en esta frontera; el core
// nunca inspecciona identidad ni roles.
pub(crate) async fn owner_from_auth() -> Uuid {
    // Placeholder - en producción esto vendría del JWT
    Uuid::nil()
}
