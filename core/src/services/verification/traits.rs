//! Channel adapter contract

use async_trait::async_trait;

use crate::domain::entities::{VerificationChannel, VerificationStatus};
use crate::domain::value_objects::{
    ConfirmResponse, DocumentUpload, InitiateResponse, OtpCode, UploadResponse, VerificationTarget,
};
use crate::errors::{AdapterError, AdapterResult};

/// Translates the generic flow operations into one channel's backend calls
///
/// Request and response shapes specific to a channel live only in the
/// implementation; the flow never inspects them.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Channel this adapter verifies
    fn channel(&self) -> VerificationChannel;

    /// Start a verification for an already validated target
    async fn initiate(&self, target: &VerificationTarget) -> AdapterResult<InitiateResponse>;

    /// Confirm a one-time code for the session identified by `verification_id`
    async fn confirm(&self, code: &OtpCode, verification_id: &str) -> AdapterResult<ConfirmResponse> {
        let _ = (code, verification_id);
        Err(AdapterError::Unsupported {
            channel: self.channel(),
            operation: "confirm",
        })
    }

    /// Send a fresh code for the session identified by `verification_id`
    async fn resend(&self, verification_id: &str) -> AdapterResult<InitiateResponse> {
        let _ = verification_id;
        Err(AdapterError::Unsupported {
            channel: self.channel(),
            operation: "resend",
        })
    }

    /// Upload a document and request verification in one call
    async fn upload_document(
        &self,
        document: &DocumentUpload,
        target: &VerificationTarget,
        verification_id: Option<&str>,
    ) -> AdapterResult<UploadResponse> {
        let _ = (document, target, verification_id);
        Err(AdapterError::Unsupported {
            channel: self.channel(),
            operation: "upload_document",
        })
    }

    /// Persisted status of this channel for the current user
    async fn fetch_status(&self) -> AdapterResult<VerificationStatus>;
}
