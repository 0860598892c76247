//! Core pieces shared by the Presence service: configuration and logging.

pub mod config;
pub mod error;

pub use config::{CalendarConfig, Config, ServerConfig, SpotifyConfig};
pub use error::ConfigError;

use anyhow::Result;

/// Initialize logging for the service.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Presence core initialized");
    Ok(())
}
