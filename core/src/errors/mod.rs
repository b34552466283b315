//! Error types reported by the verification flow.

mod types;

pub use types::{AdapterError, AdapterResult, ValidationError};

use thiserror::Error;

use crate::domain::entities::StepKind;

/// Errors returned by [`VerificationFlow`](crate::services::VerificationFlow) operations
///
/// Every variant is locally recoverable: the flow stays in the step it was in
/// before the failed call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to start verification: {0}")]
    Initiation(AdapterError),

    #[error("Verification failed: {0}")]
    Confirmation(AdapterError),

    #[error("Failed to resend code: {0}")]
    Resend(AdapterError),

    #[error("Document upload failed: {0}")]
    Upload(AdapterError),

    #[error("Failed to load verification status: {0}")]
    Status(AdapterError),

    #[error("Cannot {action} in the {step} step")]
    InvalidTransition { action: &'static str, step: StepKind },

    #[error("Another request is already in progress")]
    Busy,

    #[error("A new code can be requested in {remaining_secs} seconds")]
    ResendNotReady { remaining_secs: u64 },

    #[error("The verification was cancelled before the request completed")]
    Abandoned,
}

impl FlowError {
    /// Short message suitable for showing inline next to the form
    pub fn user_message(&self) -> String {
        match self {
            FlowError::Validation(e) => e.to_string(),
            FlowError::Initiation(e)
            | FlowError::Confirmation(e)
            | FlowError::Resend(e)
            | FlowError::Upload(e)
            | FlowError::Status(e) => e.user_message(),
            other => other.to_string(),
        }
    }

    /// Whether the error is shown on the session
    ///
    /// Guard rejections (busy, resend not ready, invalid transition, abandoned)
    /// are no-ops for the user and leave the session untouched.
    pub fn is_surfaced(&self) -> bool {
        !matches!(
            self,
            FlowError::InvalidTransition { .. }
                | FlowError::Busy
                | FlowError::ResendNotReady { .. }
                | FlowError::Abandoned
        )
    }
}

pub type FlowResult<T> = Result<T, FlowError>;
