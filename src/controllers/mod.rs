//! Controllers de la aplicación
//!
//! Orquestan repositorios y servicios del core; son la frontera donde se
//! resuelve identidad y donde vive el I/O asíncrono.

pub mod analytics_controller;
pub mod maintenance_controller;
pub mod trip_controller;
pub mod vehicle_controller;
