//! Validation and adapter error types
//!
//! Validation messages are the exact inline strings shown to the user, so
//! the `Display` output of [`ValidationError`] is the user-facing text.

use thiserror::Error;

use crate::domain::entities::VerificationChannel;

/// Local format failures detected before any network call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid 10-digit Indian mobile number")]
    InvalidPhone,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid PAN (e.g., ABCDE1234F)")]
    InvalidPan,

    #[error("Please enter a valid 12-digit Aadhaar number")]
    InvalidAadhaar,

    #[error("Please enter a valid bank account number")]
    InvalidAccountNumber,

    #[error("Please enter a valid IFSC code (e.g., SBIN0001234)")]
    InvalidIfsc,

    #[error("Please enter the name as it appears on your {document}")]
    MissingName { document: &'static str },

    #[error("Please enter a valid 6-digit code")]
    InvalidCode,

    #[error("Please select a file to upload")]
    NoDocument,

    #[error("File size must be less than {}MB", format_megabytes(.limit_bytes))]
    FileTooLarge { limit_bytes: u64 },

    #[error("Only JPG, PNG or PDF files are allowed")]
    UnsupportedFileType { content_type: String },

    #[error("A {actual} target cannot be verified in the {expected} flow")]
    ChannelMismatch {
        expected: VerificationChannel,
        actual: VerificationChannel,
    },
}

/// Failures reported by a channel adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Server {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("{operation} is not supported for {channel} verification")]
    Unsupported {
        channel: VerificationChannel,
        operation: &'static str,
    },
}

impl AdapterError {
    /// Short message suitable for showing inline next to the form
    pub fn user_message(&self) -> String {
        match self {
            AdapterError::Network(_) => {
                "Unable to reach the server. Please check your connection and try again".into()
            }
            AdapterError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            AdapterError::Server { .. } => "Something went wrong. Please try again".into(),
            AdapterError::Rejected(message) => message.clone(),
            AdapterError::Decode(_) => "Unexpected response from the server. Please try again".into(),
            AdapterError::Unsupported { .. } => self.to_string(),
        }
    }

    /// Whether the server answered with a 5xx status
    pub fn is_server_fault(&self) -> bool {
        matches!(self, AdapterError::Server { status, .. } if *status >= 500)
    }
}

pub type AdapterResult<T> = Result<T, AdapterError>;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Whole megabytes when exact, otherwise one decimal place rounded down
/// so the stated limit never exceeds the enforced one
fn format_megabytes(bytes: &u64) -> String {
    if *bytes % BYTES_PER_MB == 0 {
        return (*bytes / BYTES_PER_MB).to_string();
    }
    let tenths = *bytes * 10 / BYTES_PER_MB;
    format!("{}.{}", tenths / 10, tenths % 10)
}
