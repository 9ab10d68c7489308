//! CLI dispatch for the request surface
//!
//! The transport here is deliberately thin: a JSON `ChartRequest` comes in
//! from a file or stdin, a JSON `ChartResponse` (or error) goes out on
//! stdout. Everything interesting happens in the services.

pub mod generate;

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::api::ephemeris::Ephemeris;
use crate::config::ChartConfig;
use crate::models::ChartRequest;
use crate::utils::ChartError;

const USAGE: &str = "usage: natalchart generate <request.json|-> [output_dir]";

pub async fn handle_command<E: Ephemeris>(
    args: &[String],
    ephemeris: &E,
    config: &ChartConfig,
) -> Result<(), ChartError> {
    match args.first().map(String::as_str) {
        Some("generate") => {
            let source = args
                .get(1)
                .ok_or_else(|| ChartError::Validation(USAGE.to_string()))?;
            let request = read_request(source)?;
            let output_dir = args
                .get(2)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("output"));

            let response = generate::run(ephemeris, config, &request, &output_dir).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Some(other) => Err(ChartError::Validation(format!(
            "Unknown command '{}'. {}",
            other, USAGE
        ))),
        None => Err(ChartError::Validation(USAGE.to_string())),
    }
}

fn read_request(source: &str) -> Result<ChartRequest, ChartError> {
    let text = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(source)?
    };
    serde_json::from_str(&text)
        .map_err(|e| ChartError::Validation(format!("Expected JSON request: {}", e)))
}
