//! Módulo de base de datos
//!
//! Maneja la conexión a PostgreSQL

pub mod connection;

pub use connection::create_pool;
