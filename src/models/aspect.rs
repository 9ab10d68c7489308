//! Aspect classification models

use super::layout::Rgb;

/// One row of the configurable aspect table
///
/// A pair of bodies qualifies for this aspect when the circular difference
/// between their longitudes is within `orb` degrees of `angle`.
#[derive(Debug, Clone)]
pub struct AspectDefinition {
    pub name: String,
    /// Nominal angle in degrees, e.g. 120 for a trine
    pub angle: f64,
    /// Maximum allowed deviation from the nominal angle
    pub orb: f64,
    pub color: Rgb,
}

impl AspectDefinition {
    pub fn new(name: &str, angle: f64, orb: f64, color: Rgb) -> Self {
        Self {
            name: name.to_string(),
            angle,
            orb,
            color,
        }
    }
}

/// A classified angular relationship between two bodies
///
/// At most one per unordered pair; `body_a`/`body_b` keep the iteration
/// order of the input so results are reproducible.
#[derive(Debug, Clone)]
pub struct AspectMatch {
    pub body_a: String,
    pub body_b: String,
    /// Circular difference between the two longitudes, in `[0, 180]`
    pub actual_diff: f64,
    /// Nominal angle of the matched definition
    pub aspect_angle: f64,
    pub aspect_name: String,
    pub color: Rgb,
    /// `|actual_diff - aspect_angle|`, minimal among qualifying definitions
    pub error: f64,
}
