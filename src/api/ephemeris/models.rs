use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One body's raw state as reported by the ephemeris service
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyState {
    /// Ecliptic longitude in degrees
    pub longitude: f64,
    /// Angular speed in degrees per day
    pub speed: f64,
}

/// Response from GET /positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionsResponse {
    pub positions: HashMap<String, BodyState>,
}

/// Response from GET /houses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuspsResponse {
    pub cusps: Vec<f64>,
}

/// Error body returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}
