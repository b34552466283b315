//! # Extrahand Verification Core
//!
//! Channel-agnostic verification flow for phone, email and identity
//! document verification. This crate contains the domain entities, the OTP
//! countdown, the step controller state machine, the channel adapter contract
//! and the error types the flow reports.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
