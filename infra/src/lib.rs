//! # Infrastructure Layer
//!
//! Concrete [`ChannelAdapter`](xh_core::ChannelAdapter) implementations for
//! the Extrahand verification flow.
//!
//! ## Architecture
//!
//! - **HTTP**: reqwest client for the backend verification API, envelope
//!   decoding and error mapping
//! - **Adapters**: one HTTP adapter per channel plus a development mock
//! - **Bootstrap**: `.env` loading and tracing subscriber installation
//!
//! ## Features
//!
//! - `mock-services`: Enable the in-memory mock adapter (default)

use tracing_subscriber::EnvFilter;
use xh_shared::{AppConfig, LogFormat, LoggingConfig};

// Re-export core types for convenience
pub use xh_core::errors::*;

/// Channel adapters - HTTP implementations and the development mock
pub mod adapters;

/// HTTP client for the backend verification API
pub mod http;

pub use adapters::{create_channel_adapter, HttpChannelAdapter};
#[cfg(feature = "mock-services")]
pub use adapters::MockChannelAdapter;
pub use http::ApiClient;

#[cfg(test)]
mod test_support;

/// Load configuration from the environment
///
/// Reads the environment specific `.env` file first, then `.env`, then
/// applies `EXTRAHAND_API_*` and `VERIFICATION_*` variables.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    let environment = xh_shared::Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    validate_config(&config)?;

    tracing::info!(
        environment = %config.environment,
        api_base_url = %config.api.base_url,
        event = "config_loaded",
        "Verification configuration loaded"
    );
    Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<(), InfrastructureError> {
    let base_url = config.api.base_url.trim();
    if base_url == adapters::MOCK_BASE_URL {
        if !config.environment.allows_mock_adapter() {
            return Err(InfrastructureError::Config(format!(
                "Mock adapter is not allowed in {}",
                config.environment
            )));
        }
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(InfrastructureError::Config(format!(
            "EXTRAHAND_API_URL must be an http(s) URL, got '{}'",
            base_url
        )));
    }
    if config.api.timeout_secs == 0 {
        return Err(InfrastructureError::Config(
            "EXTRAHAND_API_TIMEOUT_SECS must be greater than zero".to_string(),
        ));
    }
    if config.verification.tick_interval_ms == 0 {
        return Err(InfrastructureError::Config(
            "VERIFICATION_TICK_INTERVAL_MS must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Install the global tracing subscriber described by `config`
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| InfrastructureError::Config(format!("Invalid log level: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    installed.map_err(|e| InfrastructureError::General(format!("Failed to install tracing subscriber: {}", e)))
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
