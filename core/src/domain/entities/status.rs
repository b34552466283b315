//! Persisted verification status reported by the backend.

use serde::{Deserialize, Serialize};

use super::step::VerificationStep;

/// Per-user, per-channel status as persisted by the backend
///
/// The client never computes this value; it only reflects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    Pending,
    #[default]
    NotStarted,
    Failed,
    Expired,
}

impl VerificationStatus {
    /// The step a fresh flow starts in for this status
    pub fn initial_step(&self) -> VerificationStep {
        match self {
            VerificationStatus::Verified => VerificationStep::Verified,
            VerificationStatus::Pending => VerificationStep::Pending,
            _ => VerificationStep::Display,
        }
    }

    /// Whether the user may start a new attempt
    pub fn allows_new_attempt(&self) -> bool {
        !matches!(self, VerificationStatus::Verified | VerificationStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Pending => "pending",
            VerificationStatus::NotStarted => "not_started",
            VerificationStatus::Failed => "failed",
            VerificationStatus::Expired => "expired",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verified" => Ok(VerificationStatus::Verified),
            "pending" => Ok(VerificationStatus::Pending),
            "not_started" | "unverified" => Ok(VerificationStatus::NotStarted),
            "failed" | "rejected" => Ok(VerificationStatus::Failed),
            "expired" => Ok(VerificationStatus::Expired),
            _ => Err(format!("Invalid verification status: {}", s)),
        }
    }
}
