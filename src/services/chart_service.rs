//! Chart rendering onto a bitmap
//!
//! Projects the layout engine's polar placements onto pixel coordinates
//! and draws them with plotters. The ascendant (relative angle 0) sits at
//! the 9 o'clock position with angles increasing counterclockwise, the
//! traditional wheel orientation.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use crate::config::ChartConfig;
use crate::models::{ChartLayout, Rgb};
use crate::utils::ChartError;

/// Margin between the outer ring and the bitmap edge, in pixels
const EDGE_MARGIN: f64 = 12.0;

fn to_color(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Polar to pixel: relative angle 0 maps to the left edge, increasing
/// angles run counterclockwise on screen (y grows downward)
fn project(angle_deg: f64, radius: f64, cx: f64, cy: f64, r_max: f64) -> (i32, i32) {
    let theta = (180.0 + angle_deg).to_radians();
    let r = radius * r_max;
    let x = cx + r * theta.cos();
    let y = cy - r * theta.sin();
    (x.round() as i32, y.round() as i32)
}

/// The backend only rotates text in quarter turns; snap to the nearest
fn quantize_rotation(rotation_deg: f64) -> FontTransform {
    let quarter = ((rotation_deg.rem_euclid(360.0) + 45.0) / 90.0).floor() as u32 % 4;
    match quarter {
        1 => FontTransform::Rotate90,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}

/// Draw a complete layout and write the PNG to `output_path`
pub fn render_chart(
    layout: &ChartLayout,
    config: &ChartConfig,
    output_path: &Path,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

    let cx = config.width as f64 / 2.0;
    let cy = config.height as f64 / 2.0;
    let r_max = (config.width.min(config.height) as f64) / 2.0 - EDGE_MARGIN;

    // Ring outlines bounding the zodiac band and the aspect hub
    let ring_color = RGBColor(90, 90, 90);
    for ring_radius in [1.0, config.zones.zodiac_inner, config.zones.aspect] {
        root.draw(&Circle::new(
            (cx.round() as i32, cy.round() as i32),
            (ring_radius * r_max).round() as i32,
            ShapeStyle::from(&ring_color).stroke_width(1),
        ))
        .map_err(|e| ChartError::Render(format!("Failed to draw ring: {}", e)))?;
    }

    for line in &layout.lines {
        let from = project(line.angle_start, line.radius_start, cx, cy, r_max);
        let to = project(line.angle_end, line.radius_end, cx, cy, r_max);
        root.draw(&PathElement::new(
            vec![from, to],
            ShapeStyle::from(&to_color(line.color)).stroke_width(line.width),
        ))
        .map_err(|e| ChartError::Render(format!("Failed to draw line: {}", e)))?;
    }

    for label in &layout.labels {
        let position = project(label.angle_deg, label.radius, cx, cy, r_max);
        let color = to_color(label.color);
        let style = (config.font_family.as_str(), label.font_size)
            .into_font()
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Center))
            .transform(quantize_rotation(label.rotation_deg));
        root.draw(&Text::new(label.text.clone(), position, style))
            .map_err(|e| ChartError::Render(format!("Failed to draw label: {}", e)))?;
    }

    root.present()
        .map_err(|e| ChartError::Render(format!("Failed to render chart: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChartLine;
    use std::fs;

    #[test]
    fn test_project_reference_directions() {
        // Ascendant direction: left of center
        let (x, y) = project(0.0, 1.0, 500.0, 500.0, 400.0);
        assert_eq!((x, y), (100, 500));
        // 90 relative: straight down (counterclockwise on screen)
        let (x, y) = project(90.0, 1.0, 500.0, 500.0, 400.0);
        assert_eq!((x, y), (500, 900));
        // Descendant: right of center
        let (x, y) = project(180.0, 0.5, 500.0, 500.0, 400.0);
        assert_eq!((x, y), (700, 500));
    }

    #[test]
    fn test_quantize_rotation() {
        assert!(matches!(quantize_rotation(0.0), FontTransform::None));
        assert!(matches!(quantize_rotation(30.0), FontTransform::None));
        assert!(matches!(quantize_rotation(80.0), FontTransform::Rotate90));
        assert!(matches!(quantize_rotation(200.0), FontTransform::Rotate180));
        assert!(matches!(quantize_rotation(-90.0), FontTransform::Rotate270));
        assert!(matches!(quantize_rotation(350.0), FontTransform::None));
    }

    #[test]
    fn test_render_writes_png() {
        let config = ChartConfig {
            width: 200,
            height: 200,
            ..ChartConfig::default()
        };
        // Text-free layout so the test does not depend on system fonts
        let layout = ChartLayout {
            labels: vec![],
            lines: vec![ChartLine {
                angle_start: 0.0,
                angle_end: 120.0,
                radius_start: 0.38,
                radius_end: 0.38,
                color: (255, 0, 0),
                width: 1,
            }],
        };

        let path = std::env::temp_dir().join(format!(
            "natalchart_render_test_{}.png",
            uuid::Uuid::new_v4().simple()
        ));
        render_chart(&layout, &config, &path).unwrap();
        let metadata = fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0, "rendered file is empty");
        let _ = fs::remove_file(&path);
    }
}
