//! Request surface models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Incoming chart request
///
/// Every field is optional at the edge so validation can report exactly
/// which required fields are missing instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartRequest {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    /// Defaults to 0 when absent
    pub second: Option<u32>,
    /// Hours east of UTC; defaults to +8 when absent
    pub utc_offset: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// House system code passed through to the ephemeris service, default "P"
    pub house_system: Option<String>,
}

/// Per-body summary included in the response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySummary {
    pub name: String,
    pub longitude: f64,
    pub house: u8,
    pub retrograde: bool,
}

/// Successful chart generation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub message: String,
    pub chart_path: String,
    pub latitude: f64,
    pub longitude: f64,
    pub bodies: Vec<BodySummary>,
    pub generated_at: DateTime<Utc>,
}
