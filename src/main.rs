//! Booking Dashboard Server
//!
//! Run with: cargo run --bin booking-dashboard
//!
//! # Configuration
//!
//! Read from the first `config.toml` found in the user config directory,
//! `/etc/booking-dashboard/` or the working directory. Environment variables:
//! - `BOOKINGS_UPSTREAM_URL`: Stats backend base URL (default: http://localhost:5000)
//! - `BOOKINGS_HOST`: Host to bind to (default: 0.0.0.0)
//! - `BOOKINGS_PORT`: Port to listen on (default: 8084)
//! - `BOOKINGS_LOG_LEVEL`: Log level (default: info)
//! - `BOOKINGS_LOG_FORMAT`: `pretty` or `json`
//! - `RUST_LOG`: Full filter directive, wins over the log level

use booking_dashboard::api::{serve, AppState};
use booking_dashboard::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!("Starting booking dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Stats backend: {}", config.upstream.base_url);

    let state = AppState::with_upstream(&config.upstream.base_url);
    tracing::info!("Serving {} widgets", state.dashboard.catalog().len());

    serve(state, &config.server).await?;

    Ok(())
}
