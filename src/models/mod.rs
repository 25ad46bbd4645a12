//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod component;
pub mod snapshot;
pub mod trip;
pub mod vehicle;
