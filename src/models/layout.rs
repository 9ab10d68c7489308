//! Renderable layout elements
//!
//! The layout engine emits these; the renderer projects them onto the
//! bitmap verbatim. Angles are in degrees relative to the ascendant, radii
//! are fractions of the chart radius in `[0, 1]`.

/// RGB color triple, converted to the backend's color type at draw time
pub type Rgb = (u8, u8, u8);

/// Visual category of a placed label
///
/// Each category is confined to its own radial zone, so only labels of the
/// same category can collide and need angular separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelCategory {
    /// Zodiac sign names on the outer ring
    Zodiac,
    /// House numbers 1-12
    HouseNumber,
    /// ASC / IC / DSC / MC markers
    AngleMarker,
    /// Body glyphs
    Body,
    /// Per-body degree text
    DegreeText,
    /// Aspect glyphs at chord midpoints
    Aspect,
}

/// A piece of text placed on the polar canvas
#[derive(Debug, Clone)]
pub struct LabelPlacement {
    pub category: LabelCategory,
    /// Ascendant-relative angle in `[0, 360)`
    pub angle_deg: f64,
    /// Radius as a fraction of the chart radius
    pub radius: f64,
    pub text: String,
    /// Requested text rotation; the renderer quantizes to quarter turns
    pub rotation_deg: f64,
    pub color: Rgb,
    pub font_size: f64,
}

/// A straight segment between two polar points
#[derive(Debug, Clone)]
pub struct ChartLine {
    pub angle_start: f64,
    pub angle_end: f64,
    pub radius_start: f64,
    pub radius_end: f64,
    pub color: Rgb,
    pub width: u32,
}

/// Everything the renderer needs for one chart
#[derive(Debug, Clone, Default)]
pub struct ChartLayout {
    pub labels: Vec<LabelPlacement>,
    pub lines: Vec<ChartLine>,
}

impl ChartLayout {
    /// Labels of one category, in placement order
    pub fn labels_in(&self, category: LabelCategory) -> impl Iterator<Item = &LabelPlacement> {
        self.labels.iter().filter(move |l| l.category == category)
    }
}
