//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. El core de
//! reglas (desgaste, odómetro, riesgo, analytics) es síncrono y puro; el
//! único servicio con I/O es el cliente de distancias.

pub mod distance_service;
pub mod fleet_analytics_service;
pub mod odometer_service;
pub mod trip_risk_service;
pub mod wear_model;
