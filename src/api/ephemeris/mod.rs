pub mod client;
pub mod models;

pub use client::EphemerisClient;
pub use models::BodyState;

use std::collections::HashMap;

use crate::utils::ChartError;

/// The external ephemeris contract
///
/// The service behind this trait owns all astronomical computation; this
/// crate only consumes longitudes, speeds and cusps. Implemented by the
/// HTTP client in production and by fixtures in tests.
#[allow(async_fn_in_trait)]
pub trait Ephemeris {
    /// Body name -> state at the given Julian day
    async fn positions(&self, julian_day: f64) -> Result<HashMap<String, BodyState>, ChartError>;

    /// Twelve raw house cusp longitudes for the given moment and place.
    /// `system` is an opaque house-system code (e.g. "P" for Placidus).
    async fn cusps(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: &str,
    ) -> Result<Vec<f64>, ChartError>;
}
