//! Chart layout engine
//!
//! Maps geometry (cusps, body positions, aspect matches) to renderable
//! angular/radial placements. All angles leaving this module are relative
//! to the ascendant so the chart orientation is stable regardless of the
//! ascendant's absolute longitude. Each visual category lives in its own
//! radial band; within a band, a greedy bounded nudge loop keeps labels
//! from overlapping. No drawing happens here.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::warn;

use crate::config::ChartConfig;
use crate::models::{
    AspectMatch, CelestialBody, ChartLayout, ChartLine, LabelCategory, LabelPlacement, Rgb,
};
use crate::services::house_service::HouseWheel;
use crate::utils::{circular_diff, circular_midpoint, normalize_degrees};

const ZODIAC_SIGNS: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

const ZODIAC_COLOR: Rgb = (70, 70, 160);
const LINE_COLOR: Rgb = (128, 128, 128);
const TEXT_COLOR: Rgb = (40, 40, 40);

lazy_static! {
    /// Body glyph and display color, keyed by body name
    static ref BODY_GLYPHS: HashMap<&'static str, (&'static str, Rgb)> = {
        let mut m = HashMap::new();
        m.insert("Sun", ("\u{2609}", (218, 165, 32)));
        m.insert("Moon", ("\u{263D}", (112, 128, 144)));
        m.insert("Mercury", ("\u{263F}", (184, 134, 11)));
        m.insert("Venus", ("\u{2640}", (0, 139, 139)));
        m.insert("Mars", ("\u{2642}", (178, 34, 34)));
        m.insert("Jupiter", ("\u{2643}", (65, 105, 225)));
        m.insert("Saturn", ("\u{2644}", (105, 105, 105)));
        m.insert("Uranus", ("\u{2645}", (72, 61, 139)));
        m.insert("Neptune", ("\u{2646}", (25, 25, 112)));
        m.insert("Pluto", ("\u{2647}", (139, 69, 19)));
        m
    };

    /// Aspect glyphs, keyed by aspect name
    static ref ASPECT_GLYPHS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("conjunction", "\u{260C}");
        m.insert("semisextile", "\u{26BA}");
        m.insert("semisquare", "\u{2220}");
        m.insert("septile", "S");
        m.insert("sextile", "\u{26B9}");
        m.insert("quintile", "Q");
        m.insert("square", "\u{25A1}");
        m.insert("trine", "\u{25B3}");
        m.insert("sesquisquare", "\u{26BC}");
        m.insert("biquintile", "bQ");
        m.insert("quincunx", "\u{26BB}");
        m.insert("opposition", "\u{260D}");
        m
    };
}

/// Greedy collision avoidance for one label category
///
/// Labels are processed in input order; a label within the minimum
/// separation of an already-placed one is nudged forward by the separation
/// step until clear, capped at `max_nudges` iterations. On cap exhaustion
/// the label stays at its last computed angle (soft degradation) since a
/// category can hold more labels than fit at the configured separation.
struct CategoryPlacer {
    placed: Vec<f64>,
    min_separation: f64,
    max_nudges: usize,
}

impl CategoryPlacer {
    fn new(min_separation: f64, max_nudges: usize) -> Self {
        Self {
            placed: Vec::new(),
            min_separation,
            max_nudges,
        }
    }

    fn conflicts(&self, angle: f64) -> bool {
        self.placed
            .iter()
            .any(|&p| circular_diff(p, angle) < self.min_separation)
    }

    fn place(&mut self, natural_angle: f64) -> f64 {
        let mut angle = normalize_degrees(natural_angle);
        let mut nudges = 0;
        while self.conflicts(angle) {
            if nudges >= self.max_nudges {
                warn!(
                    "Label at {:.2} still overlapping after {} nudges, placing anyway",
                    angle, nudges
                );
                break;
            }
            angle = normalize_degrees(angle + self.min_separation);
            nudges += 1;
        }
        self.placed.push(angle);
        angle
    }
}

/// Turns one chart's geometry into a flat set of placements and lines
pub struct ChartLayoutEngine<'a> {
    config: &'a ChartConfig,
}

impl<'a> ChartLayoutEngine<'a> {
    pub fn new(config: &'a ChartConfig) -> Self {
        Self { config }
    }

    fn placer(&self) -> CategoryPlacer {
        CategoryPlacer::new(self.config.min_label_separation, self.config.max_nudges)
    }

    /// Lay out the full chart
    ///
    /// Deterministic: the same bodies, wheel and aspects always produce the
    /// same layout, because every category processes its elements in the
    /// iteration order of its input.
    pub fn layout(
        &self,
        bodies: &[CelestialBody],
        wheel: &HouseWheel,
        aspects: &[AspectMatch],
    ) -> ChartLayout {
        let ascendant = wheel.ascendant();
        let mut layout = ChartLayout::default();

        self.place_zodiac(ascendant, &mut layout);
        self.place_houses(wheel, ascendant, &mut layout);
        self.place_angle_markers(wheel, ascendant, &mut layout);
        let body_angles = self.place_bodies(bodies, ascendant, &mut layout);
        self.place_degree_texts(bodies, &body_angles, &mut layout);
        self.place_aspects(aspects, &body_angles, &mut layout);

        layout
    }

    /// Zodiac ring: sign names at sign midpoints, boundary ticks every 30
    /// degrees. Sign boundaries are absolute (Aries starts at 0), only
    /// their on-screen angle depends on the ascendant.
    fn place_zodiac(&self, ascendant: f64, layout: &mut ChartLayout) {
        let zones = &self.config.zones;
        let mut placer = self.placer();
        for (i, sign) in ZODIAC_SIGNS.iter().enumerate() {
            let start = normalize_degrees(30.0 * i as f64 - ascendant);
            let label_angle = placer.place(normalize_degrees(start + 15.0));
            layout.labels.push(LabelPlacement {
                category: LabelCategory::Zodiac,
                angle_deg: label_angle,
                radius: zones.zodiac_label,
                text: sign.to_string(),
                rotation_deg: 0.0,
                color: ZODIAC_COLOR,
                font_size: 15.0,
            });
            layout.lines.push(ChartLine {
                angle_start: start,
                angle_end: start,
                radius_start: zones.zodiac_inner,
                radius_end: 1.0,
                color: LINE_COLOR,
                width: 1,
            });
        }
    }

    /// House numbers at the circular midpoint of each house's two cusps,
    /// plus a cusp line per house (the four chart angles drawn heavier)
    fn place_houses(&self, wheel: &HouseWheel, ascendant: f64, layout: &mut ChartLayout) {
        let zones = &self.config.zones;
        let mut placer = self.placer();
        for cusp in wheel.cusps() {
            let next = wheel.cusp(if cusp.index == 12 { 1 } else { cusp.index + 1 });
            let midpoint = circular_midpoint(cusp.longitude, next);
            let label_angle = placer.place(normalize_degrees(midpoint - ascendant));
            layout.labels.push(LabelPlacement {
                category: LabelCategory::HouseNumber,
                angle_deg: label_angle,
                radius: zones.house_number,
                text: cusp.index.to_string(),
                rotation_deg: 0.0,
                color: TEXT_COLOR,
                font_size: 13.0,
            });

            let is_chart_angle = matches!(cusp.index, 1 | 4 | 7 | 10);
            let cusp_angle = normalize_degrees(cusp.longitude - ascendant);
            layout.lines.push(ChartLine {
                angle_start: cusp_angle,
                angle_end: cusp_angle,
                radius_start: zones.aspect,
                radius_end: zones.zodiac_inner,
                color: if is_chart_angle { TEXT_COLOR } else { LINE_COLOR },
                width: if is_chart_angle { 2 } else { 1 },
            });
        }
    }

    /// ASC / IC / DSC / MC markers at cusps 1, 4, 7 and 10
    fn place_angle_markers(&self, wheel: &HouseWheel, ascendant: f64, layout: &mut ChartLayout) {
        let zones = &self.config.zones;
        let mut placer = self.placer();
        for (house, marker) in [(1u8, "ASC"), (4, "IC"), (7, "DSC"), (10, "MC")] {
            let angle = placer.place(normalize_degrees(wheel.cusp(house) - ascendant));
            layout.labels.push(LabelPlacement {
                category: LabelCategory::AngleMarker,
                angle_deg: angle,
                radius: zones.angle_marker,
                text: marker.to_string(),
                rotation_deg: 0.0,
                color: TEXT_COLOR,
                font_size: 12.0,
            });
        }
    }

    /// Body glyphs, collision-avoided; returns each body's placed angle
    /// for the degree-text and aspect passes
    fn place_bodies(
        &self,
        bodies: &[CelestialBody],
        ascendant: f64,
        layout: &mut ChartLayout,
    ) -> HashMap<String, f64> {
        let zones = &self.config.zones;
        let mut placer = self.placer();
        let mut placed_angles = HashMap::new();

        for body in bodies {
            let (glyph, color) = BODY_GLYPHS
                .get(body.name.as_str())
                .copied()
                .unwrap_or(("\u{2605}", TEXT_COLOR));
            let angle = placer.place(normalize_degrees(body.longitude - ascendant));
            placed_angles.insert(body.name.clone(), angle);
            layout.labels.push(LabelPlacement {
                category: LabelCategory::Body,
                angle_deg: angle,
                radius: zones.body,
                text: glyph.to_string(),
                rotation_deg: 0.0,
                color,
                font_size: 20.0,
            });
        }

        placed_angles
    }

    /// Degree text per body: degrees within the sign, with a retrograde
    /// marker. Seeded from the body's placed angle so the text tracks its
    /// glyph, then collision-avoided within its own band.
    fn place_degree_texts(
        &self,
        bodies: &[CelestialBody],
        body_angles: &HashMap<String, f64>,
        layout: &mut ChartLayout,
    ) {
        let zones = &self.config.zones;
        let mut placer = self.placer();
        for body in bodies {
            let natural = body_angles.get(&body.name).copied().unwrap_or(0.0);
            let angle = placer.place(natural);
            let in_sign = body.longitude % 30.0;
            let marker = if body.retrograde { " \u{211E}" } else { "" };
            layout.labels.push(LabelPlacement {
                category: LabelCategory::DegreeText,
                angle_deg: angle,
                radius: zones.degree_text,
                text: format!("{:.1}\u{B0}{}", in_sign, marker),
                rotation_deg: 0.0,
                color: TEXT_COLOR,
                font_size: 10.0,
            });
        }
    }

    /// One chord per aspect between the two placed body angles, plus an
    /// aspect glyph at the chord's circular midpoint. Vector averaging
    /// keeps the midpoint correct across the 0/360 seam.
    fn place_aspects(
        &self,
        aspects: &[AspectMatch],
        body_angles: &HashMap<String, f64>,
        layout: &mut ChartLayout,
    ) {
        let zones = &self.config.zones;
        let mut placer = self.placer();
        for aspect in aspects {
            let (Some(&a), Some(&b)) = (
                body_angles.get(&aspect.body_a),
                body_angles.get(&aspect.body_b),
            ) else {
                continue;
            };

            layout.lines.push(ChartLine {
                angle_start: a,
                angle_end: b,
                radius_start: zones.aspect,
                radius_end: zones.aspect,
                color: aspect.color,
                width: 1,
            });

            let glyph = ASPECT_GLYPHS
                .get(aspect.aspect_name.as_str())
                .copied()
                .unwrap_or("*");
            let label_angle = placer.place(circular_midpoint(a, b));
            layout.labels.push(LabelPlacement {
                category: LabelCategory::Aspect,
                angle_deg: label_angle,
                radius: zones.aspect_label,
                text: glyph.to_string(),
                rotation_deg: 0.0,
                color: aspect.color,
                font_size: 12.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AspectDefinition;
    use crate::services::aspect_service::detect_aspects;

    fn test_config() -> ChartConfig {
        ChartConfig::default()
    }

    fn equal_wheel() -> HouseWheel {
        let cusps: Vec<f64> = (0..12).map(|i| 30.0 * i as f64).collect();
        HouseWheel::new(&cusps).unwrap()
    }

    fn bodies_at(longitudes: &[f64]) -> Vec<CelestialBody> {
        longitudes
            .iter()
            .enumerate()
            .map(|(i, &lon)| CelestialBody::new(format!("Body{}", i), lon, 1.0))
            .collect()
    }

    #[test]
    fn test_min_separation_within_category() {
        let config = test_config();
        let engine = ChartLayoutEngine::new(&config);
        // Five bodies crowded within a degree of each other
        let bodies = bodies_at(&[100.0, 100.2, 100.4, 100.6, 100.8]);
        let layout = engine.layout(&bodies, &equal_wheel(), &[]);

        let angles: Vec<f64> = layout
            .labels_in(LabelCategory::Body)
            .map(|l| l.angle_deg)
            .collect();
        assert_eq!(angles.len(), 5);
        for i in 0..angles.len() {
            for j in (i + 1)..angles.len() {
                assert!(
                    circular_diff(angles[i], angles[j]) >= config.min_label_separation - 1e-9,
                    "labels {} and {} too close: {} vs {}",
                    i,
                    j,
                    angles[i],
                    angles[j]
                );
            }
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let config = test_config();
        let engine = ChartLayoutEngine::new(&config);
        let bodies = bodies_at(&[10.0, 11.0, 12.0, 130.0, 185.0]);
        let aspects = detect_aspects(&bodies, &config.aspects);
        let wheel = equal_wheel();

        let first = engine.layout(&bodies, &wheel, &aspects);
        let second = engine.layout(&bodies, &wheel, &aspects);
        assert_eq!(first.labels.len(), second.labels.len());
        for (a, b) in first.labels.iter().zip(second.labels.iter()) {
            assert_eq!(a.angle_deg, b.angle_deg);
            assert_eq!(a.text, b.text);
        }
    }

    #[test]
    fn test_overfull_category_terminates() {
        // 200 labels at 3 degree separation cannot fit on the circle; the
        // placer must hit its cap and place anyway instead of spinning
        let mut placer = CategoryPlacer::new(3.0, 120);
        for _ in 0..200 {
            let angle = placer.place(0.0);
            assert!((0.0..360.0).contains(&angle));
        }
        assert_eq!(placer.placed.len(), 200);
    }

    #[test]
    fn test_ascendant_renders_at_zero() {
        let config = test_config();
        let engine = ChartLayoutEngine::new(&config);
        let cusps: Vec<f64> = (0..12).map(|i| (250.0 + 30.0 * i as f64) % 360.0).collect();
        let wheel = HouseWheel::new(&cusps).unwrap();
        // A body exactly on the ascendant
        let bodies = vec![CelestialBody::new("Sun", 250.0, 1.0)];
        let layout = engine.layout(&bodies, &wheel, &[]);

        let sun = layout.labels_in(LabelCategory::Body).next().unwrap();
        assert!(sun.angle_deg.abs() < 1e-9);
        let asc = layout
            .labels_in(LabelCategory::AngleMarker)
            .find(|l| l.text == "ASC")
            .unwrap();
        assert!(asc.angle_deg.abs() < 1e-9);
    }

    #[test]
    fn test_aspect_label_at_seam_midpoint() {
        let config = test_config();
        let engine = ChartLayoutEngine::new(&config);
        // Ascendant at 0, bodies at 350 and 10: conjunction across the seam
        let bodies = vec![
            CelestialBody::new("Sun", 350.0, 1.0),
            CelestialBody::new("Moon", 10.0, 1.0),
        ];
        let aspects = detect_aspects(&bodies, &[AspectDefinition::new(
            "conjunction",
            0.0,
            20.0,
            (128, 0, 128),
        )]);
        assert_eq!(aspects.len(), 1);
        let layout = engine.layout(&bodies, &equal_wheel(), &aspects);

        let label = layout.labels_in(LabelCategory::Aspect).next().unwrap();
        assert!(
            label.angle_deg < 10.0 || label.angle_deg > 350.0,
            "midpoint landed at {}",
            label.angle_deg
        );
    }

    #[test]
    fn test_categories_keep_their_radii() {
        let config = test_config();
        let engine = ChartLayoutEngine::new(&config);
        let bodies = bodies_at(&[10.0, 70.0, 190.0]);
        let aspects = detect_aspects(&bodies, &config.aspects);
        let layout = engine.layout(&bodies, &equal_wheel(), &aspects);

        for label in &layout.labels {
            let expected = match label.category {
                LabelCategory::Zodiac => config.zones.zodiac_label,
                LabelCategory::HouseNumber => config.zones.house_number,
                LabelCategory::AngleMarker => config.zones.angle_marker,
                LabelCategory::Body => config.zones.body,
                LabelCategory::DegreeText => config.zones.degree_text,
                LabelCategory::Aspect => config.zones.aspect_label,
            };
            assert_eq!(label.radius, expected);
        }
    }

    #[test]
    fn test_full_complement_of_static_labels() {
        let config = test_config();
        let engine = ChartLayoutEngine::new(&config);
        let layout = engine.layout(&[], &equal_wheel(), &[]);
        assert_eq!(layout.labels_in(LabelCategory::Zodiac).count(), 12);
        assert_eq!(layout.labels_in(LabelCategory::HouseNumber).count(), 12);
        assert_eq!(layout.labels_in(LabelCategory::AngleMarker).count(), 4);
        // 12 zodiac ticks + 12 cusp lines
        assert_eq!(layout.lines.len(), 24);
    }
}
