//! Backend verification API configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Connection settings for the backend verification API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the backend (scheme + host, optional port)
    pub base_url: String,

    /// Path prefix under which the verification endpoints live
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:4000"),
            path_prefix: default_path_prefix(),
            auth_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Create a configuration pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Attach a bearer token
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::default().overridden_from_env()
    }

    /// Apply `EXTRAHAND_API_*` overrides on top of `self`
    pub fn overridden_from_env(mut self) -> Self {
        if let Ok(url) = env::var("EXTRAHAND_API_URL") {
            self.base_url = url;
        }
        if let Ok(prefix) = env::var("EXTRAHAND_API_PREFIX") {
            self.path_prefix = prefix;
        }
        if let Ok(token) = env::var("EXTRAHAND_API_TOKEN") {
            if !token.trim().is_empty() {
                self.auth_token = Some(token);
            }
        }
        if let Some(secs) = env::var("EXTRAHAND_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_secs = secs;
        }
        self
    }

    /// Full URL for a channel operation, e.g. `{base}{prefix}/phone/initiate`
    pub fn endpoint(&self, channel: &str, operation: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path_prefix.trim_matches('/'),
            channel,
            operation
        )
    }
}

fn default_path_prefix() -> String {
    String::from("/api/v1/verification")
}

fn default_timeout_secs() -> u64 {
    30
}
