//! House cusp normalization and house assignment

use tracing::debug;

use crate::api::ephemeris::Ephemeris;
use crate::models::HouseCusp;
use crate::utils::{normalize_degrees, ChartError};

/// Validated circular partition of the zodiac into twelve houses
///
/// Cusps are stored normalized into `[0, 360)` in house order 1..12. The
/// sequence increases modulo 360 with exactly one wrap point, so every
/// longitude belongs to exactly one house.
#[derive(Debug, Clone)]
pub struct HouseWheel {
    cusps: [f64; 12],
}

impl HouseWheel {
    /// Build a wheel from twelve raw cusp longitudes
    ///
    /// Fewer than 12 values, non-finite values, duplicates after
    /// normalization, or an out-of-order sequence are all upstream data
    /// errors and fail the request.
    pub fn new(raw: &[f64]) -> Result<Self, ChartError> {
        if raw.len() != 12 {
            return Err(ChartError::Calculation(format!(
                "Expected 12 house cusps, got {}",
                raw.len()
            )));
        }

        let mut cusps = [0.0; 12];
        for (i, &value) in raw.iter().enumerate() {
            if !value.is_finite() {
                return Err(ChartError::Calculation(format!(
                    "Non-finite cusp longitude for house {}",
                    i + 1
                )));
            }
            cusps[i] = normalize_degrees(value);
        }

        for i in 0..12 {
            for j in (i + 1)..12 {
                if cusps[i] == cusps[j] {
                    return Err(ChartError::Calculation(format!(
                        "Degenerate cusp data: houses {} and {} share longitude {}",
                        i + 1,
                        j + 1,
                        cusps[i]
                    )));
                }
            }
        }

        // A valid circular partition descends exactly once going around
        let descents = (0..12).filter(|&i| cusps[i] > cusps[(i + 1) % 12]).count();
        if descents != 1 {
            return Err(ChartError::Calculation(
                "Cusp sequence does not form a circular partition".to_string(),
            ));
        }

        Ok(Self { cusps })
    }

    /// The house-1 cusp, used as the angular reference for the whole chart
    pub fn ascendant(&self) -> f64 {
        self.cusps[0]
    }

    /// Cusp longitude for a house number in 1..=12
    pub fn cusp(&self, house: u8) -> f64 {
        self.cusps[(house as usize - 1) % 12]
    }

    /// All cusps in house order
    pub fn cusps(&self) -> impl Iterator<Item = HouseCusp> + '_ {
        self.cusps.iter().enumerate().map(|(i, &longitude)| HouseCusp {
            index: (i + 1) as u8,
            longitude,
        })
    }

    /// House containing a longitude: the `i` with the point in
    /// `[cusp[i], cusp[i+1])` going around the circle. The last interval
    /// wraps past 360, so house 12 claims `>= cusp[11]` or `< cusp[0]`.
    pub fn house_of(&self, longitude: f64) -> u8 {
        let d = normalize_degrees(longitude);
        for i in 0..12 {
            let start = self.cusps[i];
            let end = self.cusps[(i + 1) % 12];
            let inside = if start <= end {
                d >= start && d < end
            } else {
                d >= start || d < end
            };
            if inside {
                return (i + 1) as u8;
            }
        }
        // Unreachable for a validated wheel; fall back rather than panic
        12
    }
}

/// Retrieve and validate the house wheel for a moment and place
pub async fn fetch_house_wheel<E: Ephemeris>(
    ephemeris: &E,
    julian_day: f64,
    latitude: f64,
    longitude: f64,
    system: &str,
) -> Result<HouseWheel, ChartError> {
    let raw = ephemeris.cusps(julian_day, latitude, longitude, system).await?;
    let wheel = HouseWheel::new(&raw)?;
    debug!(
        "House wheel ready, ascendant at {:.2} (system {})",
        wheel.ascendant(),
        system
    );
    Ok(wheel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_wheel_from(start: f64) -> HouseWheel {
        let cusps: Vec<f64> = (0..12).map(|i| (start + 30.0 * i as f64) % 360.0).collect();
        HouseWheel::new(&cusps).unwrap()
    }

    #[test]
    fn test_wraparound_assignment() {
        // Cusps at 15, 45, ..., 345; a body at 10 sits before cusp 1 and
        // after cusp 12, i.e. in house 12
        let wheel = equal_wheel_from(15.0);
        assert_eq!(wheel.house_of(10.0), 12);
        assert_eq!(wheel.house_of(15.0), 1);
        assert_eq!(wheel.house_of(44.999), 1);
        assert_eq!(wheel.house_of(45.0), 2);
        assert_eq!(wheel.house_of(350.0), 12);
    }

    #[test]
    fn test_every_longitude_claimed_exactly_once() {
        let wheel = equal_wheel_from(137.5);
        for tenth in 0..3600 {
            let d = tenth as f64 / 10.0;
            let house = wheel.house_of(d);
            assert!((1..=12).contains(&house), "{} -> {}", d, house);
            // Exactly one interval claims the point
            let claims = (1..=12)
                .filter(|&h| {
                    let start = wheel.cusp(h);
                    let end = wheel.cusp(if h == 12 { 1 } else { h + 1 });
                    if start <= end {
                        d >= start && d < end
                    } else {
                        d >= start || d < end
                    }
                })
                .count();
            assert_eq!(claims, 1, "longitude {} claimed {} times", d, claims);
        }
    }

    #[test]
    fn test_too_few_cusps_rejected() {
        let result = HouseWheel::new(&[0.0, 30.0, 60.0]);
        assert!(matches!(result, Err(ChartError::Calculation(_))));
    }

    #[test]
    fn test_duplicate_cusps_rejected() {
        let mut cusps: Vec<f64> = (0..12).map(|i| 30.0 * i as f64).collect();
        cusps[5] = cusps[4];
        let result = HouseWheel::new(&cusps);
        assert!(matches!(result, Err(ChartError::Calculation(_))));
    }

    #[test]
    fn test_unordered_cusps_rejected() {
        let cusps = vec![
            0.0, 60.0, 30.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0,
        ];
        let result = HouseWheel::new(&cusps);
        assert!(matches!(result, Err(ChartError::Calculation(_))));
    }

    #[test]
    fn test_non_finite_cusp_rejected() {
        let mut cusps: Vec<f64> = (0..12).map(|i| 30.0 * i as f64).collect();
        cusps[7] = f64::INFINITY;
        assert!(HouseWheel::new(&cusps).is_err());
    }

    #[test]
    fn test_uneven_placidus_style_wheel() {
        // Unequal house sizes, as a real Placidus computation produces
        let cusps = vec![
            275.3, 310.8, 342.1, 8.4, 31.9, 54.2, 95.3, 130.8, 162.1, 188.4, 211.9, 234.2,
        ];
        let wheel = HouseWheel::new(&cusps).unwrap();
        assert_eq!(wheel.house_of(276.0), 1);
        assert_eq!(wheel.house_of(0.0), 3);
        assert_eq!(wheel.house_of(250.0), 12);
    }
}
