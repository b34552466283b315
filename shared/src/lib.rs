//! Shared utilities and common types for the Extrahand verification workspace
//!
//! This crate provides functionality used by both the domain and infrastructure crates:
//! - Configuration types (environment, logging, API endpoint, verification limits)
//! - Error response structures returned by the backend
//! - Format validators and display masking for verification targets
//! - The backend response envelope

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ApiConfig, AppConfig, Environment, LogFormat, LoggingConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::ApiResponse;
pub use utils::{bank, email, identity, phone};
