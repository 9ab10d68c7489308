//! Circular arithmetic helpers shared by the house, aspect and layout code.
//!
//! Everything here works in degrees. All public functions return values in
//! `[0, 360)` (or `[0, 180]` for differences) so callers never have to
//! re-normalize.

/// Normalize an angle into `[0, 360)`.
///
/// Idempotent: `normalize_degrees(normalize_degrees(x)) == normalize_degrees(x)`.
/// Handles negative input (`-10.0` -> `350.0`).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs like -1e-15
    if normalized >= 360.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Smallest angular difference between two longitudes, in `[0, 180]`.
pub fn circular_diff(a: f64, b: f64) -> f64 {
    let mut diff = (a - b).abs() % 360.0;
    if diff > 180.0 {
        diff = 360.0 - diff;
    }
    diff
}

/// Angular midpoint of two longitudes, computed by unit-vector averaging.
///
/// A naive arithmetic mean fails across the 0/360 seam: the midpoint of
/// 350 and 10 is 0, not 180. Summing the unit vectors and taking `atan2`
/// of the result gives the correct short-arc midpoint.
pub fn circular_midpoint(a: f64, b: f64) -> f64 {
    let (ar, br) = (a.to_radians(), b.to_radians());
    let x = ar.cos() + br.cos();
    let y = ar.sin() + br.sin();
    normalize_degrees(y.atan2(x).to_degrees())
}
