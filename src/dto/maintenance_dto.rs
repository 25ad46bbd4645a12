//! DTOs de mantenimiento

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::component::{ServiceDecision, ServiceRecord};

/// Request para aprobar o rechazar el servicio de un componente
#[derive(Debug, Deserialize)]
pub struct ServiceApprovalRequest {
    pub approval_status: ServiceDecision,
    /// Costo facturado del servicio; requerido (> 0) cuando se aprueba
    pub cost: Option<Decimal>,
}

/// Response con el registro de servicio generado por una aprobación
#[derive(Debug, Serialize)]
pub struct ServiceRecordResponse {
    pub id: String,
    pub vehicle_id: String,
    pub component_name: String,
    pub cost: Decimal,
    pub odometer_at_service: i64,
    pub completed_at: String,
}

impl From<ServiceRecord> for ServiceRecordResponse {
    fn from(record: ServiceRecord) -> Self {
        Self {
            id: record.id.to_string(),
            vehicle_id: record.vehicle_id.to_string(),
            component_name: record.component_name,
            cost: record.cost,
            odometer_at_service: record.odometer_at_service,
            completed_at: record.completed_at.to_rfc3339(),
        }
    }
}
