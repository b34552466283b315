//! Verification flow configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Maximum accepted size of an identity document (5 MB)
pub const MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted for identity documents
pub const ALLOWED_DOCUMENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

/// Settings that shape every verification flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Expiry used when the backend omits `expiresInMinutes`
    #[serde(default = "default_expires_in_minutes")]
    pub default_expires_in_minutes: u32,

    /// Largest document accepted by the upload step
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: u64,

    /// MIME types accepted by the upload step
    #[serde(default = "default_allowed_document_types")]
    pub allowed_document_types: Vec<String>,

    /// Period of the OTP countdown in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            default_expires_in_minutes: default_expires_in_minutes(),
            max_document_bytes: default_max_document_bytes(),
            allowed_document_types: default_allowed_document_types(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl VerificationConfig {
    /// Whether `content_type` is one of the accepted document types
    pub fn accepts_document_type(&self, content_type: &str) -> bool {
        self.allowed_document_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type.trim()))
    }

    /// Apply `VERIFICATION_*` overrides on top of `self`
    pub fn overridden_from_env(self) -> Self {
        self.overridden_with(|key| env::var(key).ok())
    }

    /// Apply overrides read through `lookup`; unparsable values are ignored
    pub fn overridden_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(minutes) = lookup("VERIFICATION_DEFAULT_EXPIRES_MINUTES").and_then(|v| v.parse().ok()) {
            self.default_expires_in_minutes = minutes;
        }
        if let Some(bytes) = lookup("VERIFICATION_MAX_DOCUMENT_BYTES").and_then(|v| v.parse().ok()) {
            self.max_document_bytes = bytes;
        }
        if let Some(ms) = lookup("VERIFICATION_TICK_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.tick_interval_ms = ms;
        }
        self
    }
}

fn default_expires_in_minutes() -> u32 {
    5
}

fn default_max_document_bytes() -> u64 {
    MAX_DOCUMENT_BYTES
}

fn default_allowed_document_types() -> Vec<String> {
    ALLOWED_DOCUMENT_TYPES.iter().map(|t| t.to_string()).collect()
}

fn default_tick_interval_ms() -> u64 {
    1000
}
