//! Process-wide chart configuration
//!
//! Built once at startup and passed by reference into the pipeline; never
//! mutated per request, so it is safe to share across concurrent requests.

use std::time::Duration;

use crate::models::AspectDefinition;

/// Radii of the concentric bands, as fractions of the chart radius
/// (outer to inner). Each visual category gets its own band so different
/// categories never collide regardless of angle.
#[derive(Debug, Clone)]
pub struct RadialZones {
    /// Zodiac sign labels
    pub zodiac_label: f64,
    /// Inner edge of the zodiac ring; sign boundary ticks span to here
    pub zodiac_inner: f64,
    /// House numbers
    pub house_number: f64,
    /// ASC / IC / DSC / MC markers
    pub angle_marker: f64,
    /// Body glyphs
    pub body: f64,
    /// Per-body degree text
    pub degree_text: f64,
    /// Ring where aspect chords attach
    pub aspect: f64,
    /// Aspect glyph labels, inside the chord ring
    pub aspect_label: f64,
}

impl Default for RadialZones {
    fn default() -> Self {
        Self {
            zodiac_label: 0.93,
            zodiac_inner: 0.85,
            house_number: 0.78,
            angle_marker: 0.70,
            body: 0.60,
            degree_text: 0.50,
            aspect: 0.38,
            aspect_label: 0.30,
        }
    }
}

/// Immutable configuration for the whole pipeline
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Aspect classification table; order matters for exact-error ties
    pub aspects: Vec<AspectDefinition>,
    /// Minimum angular separation between labels of the same category
    pub min_label_separation: f64,
    /// Cap on collision-avoidance nudges per label
    pub max_nudges: usize,
    pub zones: RadialZones,
    /// Output bitmap size in pixels
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    /// Output artifacts older than this are swept before each request
    pub retention: Duration,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            aspects: default_aspects(),
            min_label_separation: 3.0,
            max_nudges: 120,
            zones: RadialZones::default(),
            width: 1000,
            height: 1000,
            font_family: "sans-serif".to_string(),
            retention: Duration::from_secs(3600),
        }
    }
}

impl ChartConfig {
    /// Default configuration with env overrides applied
    ///
    /// `NATAL_RETENTION_SECS` overrides the artifact retention window.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(secs) = std::env::var("NATAL_RETENTION_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.retention = Duration::from_secs(secs);
            }
        }
        config
    }
}

/// The full aspect table: five major aspects plus the minor ones,
/// in ascending angle order
pub fn default_aspects() -> Vec<AspectDefinition> {
    vec![
        AspectDefinition::new("conjunction", 0.0, 8.0, (128, 0, 128)),
        AspectDefinition::new("semisextile", 30.0, 3.0, (255, 0, 255)),
        AspectDefinition::new("semisquare", 45.0, 3.0, (0, 255, 255)),
        AspectDefinition::new("septile", 51.43, 3.0, (128, 128, 0)),
        AspectDefinition::new("sextile", 60.0, 6.0, (0, 128, 0)),
        AspectDefinition::new("quintile", 72.0, 3.0, (0, 128, 128)),
        AspectDefinition::new("square", 90.0, 6.0, (0, 0, 255)),
        AspectDefinition::new("trine", 120.0, 6.0, (255, 165, 0)),
        AspectDefinition::new("sesquisquare", 135.0, 3.0, (255, 105, 180)),
        AspectDefinition::new("biquintile", 144.0, 3.0, (165, 42, 42)),
        AspectDefinition::new("quincunx", 150.0, 3.0, (128, 128, 128)),
        AspectDefinition::new("opposition", 180.0, 8.0, (255, 0, 0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aspect_table() {
        let aspects = default_aspects();
        assert_eq!(aspects.len(), 12);
        // Ascending angle order is what makes exact-error ties deterministic
        for pair in aspects.windows(2) {
            assert!(pair[0].angle < pair[1].angle);
        }
    }
}
