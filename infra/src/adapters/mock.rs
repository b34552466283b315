//! In-memory channel adapter for development
//!
//! Issues random six digit codes (or a fixed one) and logs them at debug
//! level instead of delivering them. Never enabled in production.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use xh_core::{
    AdapterError, AdapterResult, ChannelAdapter, ConfirmResponse, DocumentUpload,
    InitiateResponse, OtpCode, UploadResponse, VerificationChannel, VerificationStatus,
    VerificationTarget,
};
use xh_shared::error_codes;

struct MockSession {
    code: String,
    expires_at: DateTime<Utc>,
}

/// Mock adapter keeping issued codes in memory
pub struct MockChannelAdapter {
    channel: VerificationChannel,
    fixed_code: Option<String>,
    expires_in_minutes: u32,
    upload_status: VerificationStatus,
    sessions: Mutex<HashMap<String, MockSession>>,
    status: Mutex<VerificationStatus>,
    simulate_failure: AtomicBool,
    request_count: AtomicUsize,
}

impl MockChannelAdapter {
    pub fn new(channel: VerificationChannel) -> Self {
        Self {
            channel,
            fixed_code: None,
            expires_in_minutes: 2,
            upload_status: VerificationStatus::Verified,
            sessions: Mutex::new(HashMap::new()),
            status: Mutex::new(VerificationStatus::NotStarted),
            simulate_failure: AtomicBool::new(false),
            request_count: AtomicUsize::new(0),
        }
    }

    /// Issue `code` instead of random codes
    pub fn with_fixed_code(mut self, code: impl Into<String>) -> Self {
        self.fixed_code = Some(code.into());
        self
    }

    pub fn with_expires_in_minutes(mut self, minutes: u32) -> Self {
        self.expires_in_minutes = minutes;
        self
    }

    /// Status reported for uploaded documents
    pub fn with_upload_status(mut self, status: VerificationStatus) -> Self {
        self.upload_status = status;
        self
    }

    /// Make every call fail as if the network were down
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    /// Number of calls received, failed ones included
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Code issued for `verification_id`, if still pending
    pub fn code_for(&self, verification_id: &str) -> Option<String> {
        self.lock_sessions()
            .get(verification_id)
            .map(|session| session.code.clone())
    }

    fn check_available(&self) -> AdapterResult<()> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(AdapterError::Network("simulated network failure".to_string()));
        }
        Ok(())
    }

    fn issue(&self) -> InitiateResponse {
        let verification_id = format!("mock_{}", Uuid::new_v4());
        let code = self
            .fixed_code
            .clone()
            .unwrap_or_else(|| format!("{:06}", rand::thread_rng().gen_range(0..1_000_000)));

        debug!(
            channel = %self.channel,
            verification_id = %verification_id,
            code = %code,
            event = "mock_code_issued",
            "Mock verification code issued"
        );

        let now = Utc::now();
        let mut sessions = self.lock_sessions();
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(
            verification_id.clone(),
            MockSession {
                code,
                expires_at: now + Duration::minutes(i64::from(self.expires_in_minutes)),
            },
        );
        drop(sessions);
        InitiateResponse::new(verification_id, self.expires_in_minutes)
    }

    fn not_found() -> AdapterError {
        AdapterError::Server {
            status: 404,
            code: Some(error_codes::VERIFICATION_NOT_FOUND.to_string()),
            message: "Verification session not found".to_string(),
        }
    }

    fn lock_sessions(&self) -> std::sync::MutexGuard<'_, HashMap<String, MockSession>> {
        self.sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn set_status(&self, status: VerificationStatus) {
        *self
            .status
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = status;
    }
}

#[async_trait]
impl ChannelAdapter for MockChannelAdapter {
    fn channel(&self) -> VerificationChannel {
        self.channel
    }

    async fn initiate(&self, target: &VerificationTarget) -> AdapterResult<InitiateResponse> {
        self.check_available()?;
        if target.channel() != self.channel {
            return Err(AdapterError::Server {
                status: 400,
                code: Some(error_codes::VALIDATION_ERROR.to_string()),
                message: format!("Expected a {} target", self.channel),
            });
        }
        if self.channel.uses_otp() {
            Ok(self.issue())
        } else {
            Ok(InitiateResponse {
                verification_id: Some(format!("mock_{}", Uuid::new_v4())),
                expires_in_minutes: None,
            })
        }
    }

    async fn confirm(&self, code: &OtpCode, verification_id: &str) -> AdapterResult<ConfirmResponse> {
        self.check_available()?;
        let mut sessions = self.lock_sessions();
        let session = sessions.get(verification_id).ok_or_else(Self::not_found)?;

        if Utc::now() > session.expires_at {
            sessions.remove(verification_id);
            return Err(AdapterError::Server {
                status: 410,
                code: Some(error_codes::VERIFICATION_CODE_EXPIRED.to_string()),
                message: "Verification code has expired".to_string(),
            });
        }
        if session.code != code.as_str() {
            return Ok(ConfirmResponse {
                success: false,
                message: Some("Invalid OTP".to_string()),
            });
        }

        sessions.remove(verification_id);
        drop(sessions);
        self.set_status(VerificationStatus::Verified);
        Ok(ConfirmResponse {
            success: true,
            message: Some(format!("{} verified", self.channel)),
        })
    }

    async fn resend(&self, verification_id: &str) -> AdapterResult<InitiateResponse> {
        self.check_available()?;
        if self.lock_sessions().remove(verification_id).is_none() {
            return Err(Self::not_found());
        }
        Ok(self.issue())
    }

    async fn upload_document(
        &self,
        document: &DocumentUpload,
        _target: &VerificationTarget,
        _verification_id: Option<&str>,
    ) -> AdapterResult<UploadResponse> {
        self.check_available()?;
        if self.channel.uses_otp() {
            return Err(AdapterError::Unsupported {
                channel: self.channel,
                operation: "upload_document",
            });
        }
        debug!(
            channel = %self.channel,
            file_name = %document.file_name,
            size = document.size(),
            status = %self.upload_status,
            event = "mock_document_received",
            "Mock document received"
        );
        self.set_status(self.upload_status);
        Ok(UploadResponse {
            success: true,
            status: self.upload_status,
            message: None,
        })
    }

    async fn fetch_status(&self) -> AdapterResult<VerificationStatus> {
        self.check_available()?;
        Ok(*self
            .status
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner))
    }
}
