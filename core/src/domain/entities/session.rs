//! Verification session entity for one attempt on one channel.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::channel::VerificationChannel;
use super::status::VerificationStatus;
use super::step::{StepKind, VerificationStep};
use crate::domain::value_objects::VerificationTarget;

/// One user's in-progress attempt to verify one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSession {
    /// Local identifier used to correlate log lines
    pub id: Uuid,

    /// Channel being verified
    pub channel: VerificationChannel,

    /// The single active step
    pub step: VerificationStep,

    /// Last status reported by the backend
    pub status: VerificationStatus,

    /// Value already on file, shown masked in the display step
    pub current: Option<VerificationTarget>,

    /// Target submitted by the last successful initiation
    pub target: Option<VerificationTarget>,

    /// Server token correlating resend / verify calls; set only after initiation
    pub verification_id: Option<String>,

    /// When the server said the code expires
    pub expires_at: Option<DateTime<Utc>>,

    /// Inline error from the last failed operation
    pub attempt_error: Option<String>,
}

impl VerificationSession {
    /// Creates a session in the display step
    pub fn new(channel: VerificationChannel) -> Self {
        Self::with_status(channel, VerificationStatus::NotStarted)
    }

    /// Creates a session whose initial step reflects `status`
    pub fn with_status(channel: VerificationChannel, status: VerificationStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel,
            step: status.initial_step(),
            status,
            current: None,
            target: None,
            verification_id: None,
            expires_at: None,
            attempt_error: None,
        }
    }

    pub fn step_kind(&self) -> StepKind {
        self.step.kind()
    }

    /// The raw value being verified (phone number, email, PAN, ...)
    pub fn target_value(&self) -> Option<String> {
        self.target.as_ref().map(|t| t.value())
    }

    /// Masked value for display: the target under verification, else the one on file
    pub fn masked_value(&self) -> Option<String> {
        self.target
            .as_ref()
            .or(self.current.as_ref())
            .map(|t| t.masked())
    }

    /// Sets the expiry from a server TTL in minutes
    pub fn set_expiry_minutes(&mut self, minutes: u32) {
        self.expires_at = Some(Utc::now() + Duration::minutes(i64::from(minutes)));
    }

    /// Checks if the server-side code expiry has passed
    pub fn is_expired(&self) -> bool {
        self.expires_at.map_or(false, |at| Utc::now() > at)
    }

    /// Gets the time remaining until expiration, zero if expired or unknown
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        match self.expires_at {
            Some(at) if at > now => at - now,
            _ => Duration::zero(),
        }
    }

    /// Drops everything tied to the current attempt, keeping the value on file
    pub fn clear_attempt(&mut self) {
        self.target = None;
        self.verification_id = None;
        self.expires_at = None;
        self.attempt_error = None;
    }
}
