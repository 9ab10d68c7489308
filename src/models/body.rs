//! Celestial body positions

use crate::utils::normalize_degrees;

/// A celestial body's position at the chart moment
///
/// Created once per request from ephemeris data, immutable afterwards.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub name: String,
    /// Ecliptic longitude in `[0, 360)`
    pub longitude: f64,
    /// Angular speed in degrees per day; negative while retrograde
    pub speed: f64,
    pub retrograde: bool,
}

impl CelestialBody {
    pub fn new(name: impl Into<String>, longitude: f64, speed: f64) -> Self {
        Self {
            name: name.into(),
            longitude: normalize_degrees(longitude),
            speed,
            retrograde: speed < 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrograde_from_speed() {
        assert!(CelestialBody::new("Mercury", 10.0, -1.2).retrograde);
        assert!(!CelestialBody::new("Sun", 10.0, 0.98).retrograde);
    }

    #[test]
    fn test_longitude_normalized() {
        let body = CelestialBody::new("Moon", 372.5, 13.1);
        assert!((body.longitude - 12.5).abs() < 1e-9);
    }
}
