use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::models::{CuspsResponse, ErrorResponse, PositionsResponse};
use super::{BodyState, Ephemeris};
use crate::utils::ChartError;
use std::collections::HashMap;

/// HTTP client for the external ephemeris service
pub struct EphemerisClient {
    http_client: HttpClient,
    base_url: String,
}

impl EphemerisClient {
    const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8800";

    /// Create a client against the default local service
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL (env override, tests)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ChartError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ChartError::Calculation(format!("Ephemeris request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            // Prefer the service's own message when it sends one
            let message = serde_json::from_str::<ErrorResponse>(&body_text)
                .ok()
                .and_then(|e| e.message.or(e.error))
                .unwrap_or(body_text);
            warn!("Ephemeris service returned {}: {}", status, message);
            return Err(ChartError::Calculation(format!(
                "Ephemeris service error ({}): {}",
                status, message
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ChartError::Calculation(format!("Invalid ephemeris response: {}", e)))
    }
}

impl Default for EphemerisClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Ephemeris for EphemerisClient {
    async fn positions(&self, julian_day: f64) -> Result<HashMap<String, BodyState>, ChartError> {
        let response: PositionsResponse = self
            .get_json("/positions", &[("jd", julian_day.to_string())])
            .await?;
        Ok(response.positions)
    }

    async fn cusps(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: &str,
    ) -> Result<Vec<f64>, ChartError> {
        let response: CuspsResponse = self
            .get_json(
                "/houses",
                &[
                    ("jd", julian_day.to_string()),
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                    ("system", system.to_string()),
                ],
            )
            .await?;
        Ok(response.cusps)
    }
}
