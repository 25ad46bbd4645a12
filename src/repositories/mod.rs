//! Repositorios de persistencia
//!
//! Colaboradores de la capa de datos: el core de reglas no conoce SQL,
//! solo estos contratos.

pub mod fleet_repository;
pub mod trip_repository;
pub mod vehicle_repository;
