//! Local birth time to astronomical time reference

/// Convert a local calendar time plus UTC offset to a Julian day
///
/// Standard Meeus formula for the Gregorian calendar. The offset is hours
/// east of UTC, so local time minus offset gives universal time.
/// Reference point: 2000-01-01 12:00 UT = 2451545.0 (J2000.0).
pub fn julian_day(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    utc_offset: f64,
) -> f64 {
    let ut_hours =
        hour as f64 + minute as f64 / 60.0 + second as f64 / 3600.0 - utc_offset;

    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };

    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y as f64 + 4716.0)).floor()
        + (30.6001 * (m as f64 + 1.0)).floor()
        + day as f64
        + ut_hours / 24.0
        + b
        - 1524.5
}
