//! Verification steps.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{DocumentUpload, VerificationTarget};

/// Data-less discriminant of [`VerificationStep`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Display,
    Input,
    Otp,
    Upload,
    Pending,
    Verified,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Display => "display",
            StepKind::Input => "input",
            StepKind::Otp => "otp",
            StepKind::Upload => "upload",
            StepKind::Pending => "pending",
            StepKind::Verified => "verified",
        }
    }

    /// Terminal steps accept no user action besides an external reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepKind::Pending | StepKind::Verified)
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active step of a verification session, with the form state valid in it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VerificationStep {
    /// Shows the current (masked) value and a call to action
    #[default]
    Display,
    /// The user is editing the target; `draft` holds the last submitted or prefilled value
    Input { draft: Option<VerificationTarget> },
    /// A code was sent; `code` is the code field contents
    Otp { code: String },
    /// Document channels: one attached, already validated file
    Upload { document: Option<DocumentUpload> },
    /// Manual review in progress
    Pending,
    /// Channel verified
    Verified,
}

impl VerificationStep {
    pub fn kind(&self) -> StepKind {
        match self {
            VerificationStep::Display => StepKind::Display,
            VerificationStep::Input { .. } => StepKind::Input,
            VerificationStep::Otp { .. } => StepKind::Otp,
            VerificationStep::Upload { .. } => StepKind::Upload,
            VerificationStep::Pending => StepKind::Pending,
            VerificationStep::Verified => StepKind::Verified,
        }
    }

    /// Entered code, when in the OTP step
    pub fn code(&self) -> Option<&str> {
        match self {
            VerificationStep::Otp { code } => Some(code),
            _ => None,
        }
    }

    /// Attached document, when in the upload step
    pub fn document(&self) -> Option<&DocumentUpload> {
        match self {
            VerificationStep::Upload { document } => document.as_ref(),
            _ => None,
        }
    }
}
