//! Chart generation: validation and pipeline orchestration

use std::path::Path;

use tracing::{debug, info};

use crate::api::ephemeris::Ephemeris;
use crate::config::ChartConfig;
use crate::models::{BodySummary, ChartRequest, ChartResponse};
use crate::services::layout_service::ChartLayoutEngine;
use crate::services::{
    aspect_service, chart_service, house_service, output_service, position_service, time_service,
};
use crate::utils::ChartError;

// Defaults matching the original request surface
const DEFAULT_SECOND: u32 = 0;
const DEFAULT_UTC_OFFSET: f64 = 8.0;
const DEFAULT_HOUSE_SYSTEM: &str = "P";

#[derive(Debug)]
struct ValidatedRequest {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    utc_offset: f64,
    latitude: f64,
    longitude: f64,
    house_system: String,
}

fn validate(request: &ChartRequest) -> Result<ValidatedRequest, ChartError> {
    let mut missing = Vec::new();
    if request.year.is_none() {
        missing.push("year");
    }
    if request.month.is_none() {
        missing.push("month");
    }
    if request.day.is_none() {
        missing.push("day");
    }
    if request.hour.is_none() {
        missing.push("hour");
    }
    if request.minute.is_none() {
        missing.push("minute");
    }
    if request.latitude.is_none() {
        missing.push("latitude");
    }
    if request.longitude.is_none() {
        missing.push("longitude");
    }
    if !missing.is_empty() {
        return Err(ChartError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let validated = ValidatedRequest {
        year: request.year.unwrap_or_default(),
        month: request.month.unwrap_or_default(),
        day: request.day.unwrap_or_default(),
        hour: request.hour.unwrap_or_default(),
        minute: request.minute.unwrap_or_default(),
        second: request.second.unwrap_or(DEFAULT_SECOND),
        utc_offset: request.utc_offset.unwrap_or(DEFAULT_UTC_OFFSET),
        latitude: request.latitude.unwrap_or_default(),
        longitude: request.longitude.unwrap_or_default(),
        house_system: request
            .house_system
            .clone()
            .unwrap_or_else(|| DEFAULT_HOUSE_SYSTEM.to_string()),
    };

    if !(1..=12).contains(&validated.month) {
        return Err(ChartError::Validation("month must be 1-12".to_string()));
    }
    if !(1..=31).contains(&validated.day) {
        return Err(ChartError::Validation("day must be 1-31".to_string()));
    }
    if validated.hour > 23 {
        return Err(ChartError::Validation("hour must be 0-23".to_string()));
    }
    if validated.minute > 59 {
        return Err(ChartError::Validation("minute must be 0-59".to_string()));
    }
    if validated.second > 59 {
        return Err(ChartError::Validation("second must be 0-59".to_string()));
    }
    if !validated.latitude.is_finite() || validated.latitude.abs() > 90.0 {
        return Err(ChartError::Validation(
            "latitude must be between -90 and 90".to_string(),
        ));
    }
    if !validated.longitude.is_finite() || validated.longitude.abs() > 180.0 {
        return Err(ChartError::Validation(
            "longitude must be between -180 and 180".to_string(),
        ));
    }

    Ok(validated)
}

/// Run the whole pipeline for one request and write the chart image
///
/// Stateless: everything derived here lives only for this call. Fails as
/// a whole on any validation, calculation or render problem.
pub async fn run<E: Ephemeris>(
    ephemeris: &E,
    config: &ChartConfig,
    request: &ChartRequest,
    output_dir: &Path,
) -> Result<ChartResponse, ChartError> {
    let validated = validate(request)?;

    output_service::ensure_output_dir(output_dir)?;
    output_service::clean_output_folder(output_dir, config.retention);

    let julian_day = time_service::julian_day(
        validated.year,
        validated.month,
        validated.day,
        validated.hour,
        validated.minute,
        validated.second,
        validated.utc_offset,
    );
    debug!("Time reference: jd {}", julian_day);

    let bodies = position_service::fetch_positions(ephemeris, julian_day).await?;
    let wheel = house_service::fetch_house_wheel(
        ephemeris,
        julian_day,
        validated.latitude,
        validated.longitude,
        &validated.house_system,
    )
    .await?;
    let aspects = aspect_service::detect_aspects(&bodies, &config.aspects);
    info!(
        "Detected {} aspects among {} bodies",
        aspects.len(),
        bodies.len()
    );

    let layout = ChartLayoutEngine::new(config).layout(&bodies, &wheel, &aspects);

    let filename = output_service::unique_chart_filename();
    let output_path = output_dir.join(&filename);
    chart_service::render_chart(&layout, config, &output_path)?;
    info!("Chart saved successfully to: {}", output_path.display());

    let summaries = bodies
        .iter()
        .map(|body| BodySummary {
            name: body.name.clone(),
            longitude: body.longitude,
            house: wheel.house_of(body.longitude),
            retrograde: body.retrograde,
        })
        .collect();

    Ok(ChartResponse {
        message: "Chart generated successfully".to_string(),
        chart_path: output_path.display().to_string(),
        latitude: validated.latitude,
        longitude: validated.longitude,
        bodies: summaries,
        generated_at: chrono::Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ephemeris::BodyState;
    use std::collections::HashMap;

    struct FixtureEphemeris;

    impl Ephemeris for FixtureEphemeris {
        async fn positions(&self, _jd: f64) -> Result<HashMap<String, BodyState>, ChartError> {
            let mut positions = HashMap::new();
            for (name, longitude) in [
                ("Sun", 10.0),
                ("Moon", 130.0),
                ("Mercury", 25.0),
                ("Venus", 0.0),
                ("Mars", 180.0),
            ] {
                positions.insert(
                    name.to_string(),
                    BodyState {
                        longitude,
                        speed: if name == "Mercury" { -0.5 } else { 1.0 },
                    },
                );
            }
            Ok(positions)
        }

        async fn cusps(
            &self,
            _jd: f64,
            _lat: f64,
            _lon: f64,
            _system: &str,
        ) -> Result<Vec<f64>, ChartError> {
            Ok((0..12).map(|i| (15.0 + 30.0 * i as f64) % 360.0).collect())
        }
    }

    fn full_request() -> ChartRequest {
        ChartRequest {
            year: Some(1990),
            month: Some(6),
            day: Some(15),
            hour: Some(8),
            minute: Some(30),
            latitude: Some(25.03),
            longitude: Some(121.56),
            ..ChartRequest::default()
        }
    }

    #[test]
    fn test_missing_fields_named() {
        let request = ChartRequest {
            year: Some(1990),
            ..ChartRequest::default()
        };
        let err = validate(&request).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("month"));
        assert!(message.contains("latitude"));
        assert!(!message.contains("year,"));
    }

    #[test]
    fn test_range_checks() {
        let mut request = full_request();
        request.month = Some(13);
        assert!(matches!(validate(&request), Err(ChartError::Validation(_))));

        let mut request = full_request();
        request.latitude = Some(95.0);
        assert!(matches!(validate(&request), Err(ChartError::Validation(_))));
    }

    #[test]
    fn test_defaults_applied() {
        let validated = validate(&full_request()).unwrap();
        assert_eq!(validated.second, 0);
        assert_eq!(validated.utc_offset, 8.0);
        assert_eq!(validated.house_system, "P");
    }

    #[tokio::test]
    async fn test_end_to_end_generates_chart() {
        let config = ChartConfig::default();
        let output_dir =
            std::env::temp_dir().join(format!("natalchart_e2e_{}", uuid::Uuid::new_v4().simple()));

        let response = run(&FixtureEphemeris, &config, &full_request(), &output_dir)
            .await
            .unwrap();

        assert_eq!(response.message, "Chart generated successfully");
        let written = std::path::Path::new(&response.chart_path);
        assert!(written.exists());
        assert!(std::fs::metadata(written).unwrap().len() > 0);

        // Sun at 10 with cusps from 15: wrap-around into house 12
        let sun = response.bodies.iter().find(|b| b.name == "Sun").unwrap();
        assert_eq!(sun.house, 12);
        let mercury = response.bodies.iter().find(|b| b.name == "Mercury").unwrap();
        assert!(mercury.retrograde);

        let _ = std::fs::remove_file(written);
        let _ = std::fs::remove_dir(&output_dir);
    }
}
