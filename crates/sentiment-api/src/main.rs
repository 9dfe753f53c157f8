//! Sentiment API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p sentiment-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use sentiment_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration decides the log format, so load it before tracing
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        "Starting Sentiment API Server..."
    );

    sentiment_api::run(config).await?;

    Ok(())
}
