//! House cusp record

/// The ecliptic longitude where a house begins
///
/// Twelve of these partition the circle; the validated collection lives in
/// `house_service::HouseWheel`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseCusp {
    /// House number, 1 through 12
    pub index: u8,
    /// Longitude in `[0, 360)`
    pub longitude: f64,
}
