//! Channel Adapter Module
//!
//! Implementations of [`ChannelAdapter`] for the verification flow:
//!
//! - **HTTP adapter**: talks to the backend verification API, one instance per channel
//! - **Mock adapter**: in-memory codes for development (`mock-services` feature)

use std::sync::Arc;

use xh_core::{ChannelAdapter, VerificationChannel};
use xh_shared::AppConfig;

use crate::http::ApiClient;
use crate::InfrastructureError;

mod api_adapter;
mod payload;

#[cfg(feature = "mock-services")]
mod mock;

pub use api_adapter::HttpChannelAdapter;
#[cfg(feature = "mock-services")]
pub use mock::MockChannelAdapter;


/// `EXTRAHAND_API_URL` value selecting the mock adapter
pub const MOCK_BASE_URL: &str = "mock";

/// Create the adapter for `channel` described by the configuration
///
/// Uses the mock adapter when the API URL is [`MOCK_BASE_URL`] and the
/// environment allows it, the HTTP adapter otherwise.
pub fn create_channel_adapter(
    channel: VerificationChannel,
    config: &AppConfig,
) -> Result<Arc<dyn ChannelAdapter>, InfrastructureError> {
    if config.api.base_url.trim() == MOCK_BASE_URL {
        return create_mock_adapter(channel, config);
    }

    let client = Arc::new(ApiClient::new(config.api.clone())?);
    tracing::debug!(
        channel = %channel,
        base_url = %config.api.base_url,
        event = "adapter_created",
        "Created HTTP verification adapter"
    );
    Ok(Arc::new(HttpChannelAdapter::new(channel, client)))
}

#[cfg(feature = "mock-services")]
fn create_mock_adapter(
    channel: VerificationChannel,
    config: &AppConfig,
) -> Result<Arc<dyn ChannelAdapter>, InfrastructureError> {
    if !config.environment.allows_mock_adapter() {
        tracing::error!(
            environment = %config.environment,
            "Refusing to use the mock verification adapter"
        );
        return Err(InfrastructureError::Config(format!(
            "Mock adapter is not allowed in {}",
            config.environment
        )));
    }
    tracing::warn!(channel = %channel, "Using mock verification adapter");
    Ok(Arc::new(MockChannelAdapter::new(channel)))
}

#[cfg(not(feature = "mock-services"))]
fn create_mock_adapter(
    _channel: VerificationChannel,
    _config: &AppConfig,
) -> Result<Arc<dyn ChannelAdapter>, InfrastructureError> {
    Err(InfrastructureError::Config(
        "Mock adapter requires the mock-services feature".to_string(),
    ))
}
