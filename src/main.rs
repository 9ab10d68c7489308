use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use api::ephemeris::EphemerisClient;
use config::ChartConfig;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("natalchart=info".parse().unwrap()),
        )
        .with_target(true)
        .init();

    info!("Starting natal chart generator...");

    let config = ChartConfig::from_env();
    let client = match std::env::var("EPHEMERIS_URL") {
        Ok(url) => {
            info!("Using ephemeris service at {}", url);
            EphemerisClient::with_base_url(url)
        }
        Err(_) => EphemerisClient::new(),
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = commands::handle_command(&args, &client, &config).await {
        error!("{}", e);
        // Structured error on stdout for callers consuming JSON
        println!("{}", serde_json::json!({ "error": e.to_string() }));
        std::process::exit(1);
    }
}
