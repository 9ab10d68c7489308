//! Body position retrieval and validation

use tracing::debug;

use crate::api::ephemeris::Ephemeris;
use crate::models::CelestialBody;
use crate::utils::ChartError;

/// Canonical body order; also the deterministic iteration order used by
/// aspect detection and layout downstream.
pub const BODY_ORDER: [&str; 10] = [
    "Sun", "Moon", "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune", "Pluto",
];

/// Fetch body positions and convert them into validated records
///
/// Known bodies come first in canonical order; anything extra the service
/// reports (nodes, asteroids) follows sorted by name so the overall order
/// stays deterministic. Non-finite values fail the whole request.
pub async fn fetch_positions<E: Ephemeris>(
    ephemeris: &E,
    julian_day: f64,
) -> Result<Vec<CelestialBody>, ChartError> {
    let raw = ephemeris.positions(julian_day).await?;

    let mut bodies = Vec::with_capacity(raw.len());
    for name in BODY_ORDER {
        if let Some(state) = raw.get(name) {
            if !state.longitude.is_finite() || !state.speed.is_finite() {
                return Err(ChartError::Calculation(format!(
                    "Non-finite position data for {}",
                    name
                )));
            }
            bodies.push(CelestialBody::new(name, state.longitude, state.speed));
        }
    }

    let mut extras: Vec<&String> = raw
        .keys()
        .filter(|k| !BODY_ORDER.contains(&k.as_str()))
        .collect();
    extras.sort();
    for name in extras {
        let state = &raw[name];
        if !state.longitude.is_finite() || !state.speed.is_finite() {
            return Err(ChartError::Calculation(format!(
                "Non-finite position data for {}",
                name
            )));
        }
        bodies.push(CelestialBody::new(name.as_str(), state.longitude, state.speed));
    }

    if bodies.is_empty() {
        return Err(ChartError::Calculation(
            "Ephemeris returned no body positions".to_string(),
        ));
    }

    debug!("Fetched {} body positions for jd {}", bodies.len(), julian_day);
    Ok(bodies)
}
