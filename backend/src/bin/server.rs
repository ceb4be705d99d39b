//! Coverage HTTP Server Binary
//!
//! Main entry point for the coverage REST API server. It loads the
//! configuration, creates the session, sets up the HTTP router, and starts
//! serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin coverage-server
//!
//! # With an explicit configuration file
//! COVERAGE_CONFIG=backend/coverage.toml cargo run --bin coverage-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0, overrides the config file)
//! - `PORT`: Server port (default: 8080, overrides the config file)
//! - `COVERAGE_CONFIG`: Path to a `coverage.toml`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use coverage_backend::config::CoverageConfig;
use coverage_backend::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting coverage HTTP server");

    let mut config =
        CoverageConfig::from_default_location().context("Failed to load configuration")?;
    config
        .apply_env_overrides()
        .context("Invalid HOST/PORT override")?;

    let state = AppState::from_config(&config).context("Failed to create session")?;
    info!(
        "Session ready with {} clinics, default radius {} mi",
        state.session.read().clinics().len(),
        config.analysis.default_radius
    );

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid bind address")?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
