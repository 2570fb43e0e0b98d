//! Signalforge API Server
//!
//! HTTP API exposing the trading-signal pipeline. Stateless: each request
//! runs its own fetch-and-generate cycle with no cross-request state.

use dotenvy::dotenv;
use signalforge::config::{get_environment, Config};
use signalforge::core::http::start_server;
use signalforge::logging;
use std::env;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let config = Config::from_env();

    info!("Starting Signalforge API Server");
    info!(environment = %get_environment(), "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    if config.deepseek_api_key.is_none() {
        info!("DEEPSEEK_API_KEY not set; signal generation will degrade to HOLD");
    }

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
