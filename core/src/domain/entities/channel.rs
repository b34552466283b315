//! Verification channels.

use serde::{Deserialize, Serialize};

use super::step::StepKind;

/// A verification method / target type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationChannel {
    /// Mobile number, confirmed with an SMS code
    Phone,
    /// Email address, confirmed with an emailed code
    Email,
    /// Permanent Account Number, confirmed with a document upload
    Pan,
    /// Aadhaar number, confirmed with a document upload
    Aadhaar,
    /// Bank account, confirmed with a cheque or passbook upload
    Bank,
}

impl VerificationChannel {
    /// All supported channels
    pub const ALL: [VerificationChannel; 5] = [
        VerificationChannel::Phone,
        VerificationChannel::Email,
        VerificationChannel::Pan,
        VerificationChannel::Aadhaar,
        VerificationChannel::Bank,
    ];

    /// Lowercase name used in logs and endpoint paths
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationChannel::Phone => "phone",
            VerificationChannel::Email => "email",
            VerificationChannel::Pan => "pan",
            VerificationChannel::Aadhaar => "aadhaar",
            VerificationChannel::Bank => "bank",
        }
    }

    /// Whether the channel proves control with a one-time code
    pub fn uses_otp(&self) -> bool {
        matches!(self, VerificationChannel::Phone | VerificationChannel::Email)
    }

    /// Whether the channel proves ownership with an uploaded document
    pub fn requires_document(&self) -> bool {
        !self.uses_otp()
    }

    /// The step a successful initiation leads to
    pub fn step_after_initiate(&self) -> StepKind {
        if self.uses_otp() {
            StepKind::Otp
        } else {
            StepKind::Upload
        }
    }

    /// Name of the document users upload for this channel
    pub fn document_name(&self) -> &'static str {
        match self {
            VerificationChannel::Phone => "phone",
            VerificationChannel::Email => "email",
            VerificationChannel::Pan => "PAN card",
            VerificationChannel::Aadhaar => "Aadhaar card",
            VerificationChannel::Bank => "bank account",
        }
    }
}

impl std::fmt::Display for VerificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VerificationChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phone" | "mobile" => Ok(VerificationChannel::Phone),
            "email" => Ok(VerificationChannel::Email),
            "pan" => Ok(VerificationChannel::Pan),
            "aadhaar" | "aadhar" => Ok(VerificationChannel::Aadhaar),
            "bank" => Ok(VerificationChannel::Bank),
            _ => Err(format!("Invalid verification channel: {}", s)),
        }
    }
}
