//! Cliente de estimación de distancias
//!
//! Colaborador externo del core: resuelve origen/destino a una distancia
//! estimada usando la Distance Matrix API de Google. El core tolera su
//! caída: el caller degrada a 0 km con la bandera `estimate_missing`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utils::errors::{AppError, AppResult};

/// Estimación devuelta por el colaborador de distancias
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistanceEstimate {
    pub distance_km: i64,
    pub duration: Option<String>,
}

/// Contrato del colaborador de distancias
///
/// Trait para poder inyectar un stub en tests y para aislar al core del
/// proveedor concreto.
#[async_trait]
pub trait DistanceEstimator: Send + Sync {
    async fn estimate_distance(&self, origin: &str, destination: &str)
        -> AppResult<DistanceEstimate>;
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixRow {
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixElement {
    status: String,
    distance: Option<TextValue>,
    duration: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: String,
    /// metros para distance, segundos para duration
    value: i64,
}

pub struct GoogleDistanceService {
    api_key: String,
    client: reqwest::Client,
}

impl GoogleDistanceService {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { api_key, client }
    }
}

#[async_trait]
impl DistanceEstimator for GoogleDistanceService {
    async fn estimate_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> AppResult<DistanceEstimate> {
        log::info!("🗺️ Estimating distance: {} -> {}", origin, destination);

        let url = format!(
            "https://maps.googleapis.com/maps/api/distancematrix/json?origins={}&destinations={}&key={}",
            urlencoding::encode(origin),
            urlencoding::encode(destination),
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("distance matrix request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            log::error!("❌ Distance matrix returned status {}", status);
            return Err(AppError::ExternalApi(format!(
                "distance matrix returned status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApi(format!("error reading response body: {}", e)))?;

        let estimate = parse_distance_response(&body)?;
        log::info!(
            "📏 Distance {} -> {}: {} km",
            origin,
            destination,
            estimate.distance_km
        );
        Ok(estimate)
    }
}

/// Parsear la respuesta JSON de la Distance Matrix API.
///
/// Separado del transporte HTTP para poder testearlo con payloads enlatados.
fn parse_distance_response(body: &str) -> AppResult<DistanceEstimate> {
    let parsed: DistanceMatrixResponse = serde_json::from_str(body)
        .map_err(|e| AppError::ExternalApi(format!("could not parse distance response: {}", e)))?;

    if parsed.status != "OK" {
        return Err(AppError::ExternalApi(format!(
            "distance matrix status: {}",
            parsed.status
        )));
    }

    let element = parsed
        .rows
        .first()
        .and_then(|row| row.elements.first())
        .ok_or_else(|| AppError::ExternalApi("distance matrix returned no elements".to_string()))?;

    if element.status != "OK" {
        return Err(AppError::ExternalApi(format!(
            "could not get distance, element status: {}",
            element.status
        )));
    }

    let distance = element
        .distance
        .as_ref()
        .ok_or_else(|| AppError::ExternalApi("element without distance field".to_string()))?;

    // distance.value viene en metros
    let distance_km = (distance.value as f64 / 1000.0).round() as i64;
    let duration = element.duration.as_ref().map(|d| d.text.clone());

    Ok(DistanceEstimate {
        distance_km,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_successful_response() {
        let body = r#"{
            "status": "OK",
            "rows": [{
                "elements": [{
                    "status": "OK",
                    "distance": { "text": "620 km", "value": 620500 },
                    "duration": { "text": "6 hours 10 mins", "value": 22200 }
                }]
            }]
        }"#;

        let estimate = parse_distance_response(body).unwrap();
        assert_eq!(estimate.distance_km, 621);
        assert_eq!(estimate.duration.as_deref(), Some("6 hours 10 mins"));
    }

    #[test]
    fn element_error_status_is_an_external_error() {
        let body = r#"{
            "status": "OK",
            "rows": [{ "elements": [{ "status": "NOT_FOUND" }] }]
        }"#;

        let result = parse_distance_response(body);
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn top_level_error_status_is_an_external_error() {
        let body = r#"{ "status": "REQUEST_DENIED", "rows": [] }"#;

        let result = parse_distance_response(body);
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn empty_rows_are_an_external_error() {
        let body = r#"{ "status": "OK", "rows": [] }"#;

        let result = parse_distance_response(body);
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }
}
