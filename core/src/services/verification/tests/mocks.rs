//! Mock channel adapter for testing the verification flow

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::entities::{VerificationChannel, VerificationStatus};
use crate::domain::value_objects::{
    ConfirmResponse, DocumentUpload, InitiateResponse, OtpCode, UploadResponse, VerificationTarget,
};
use crate::errors::{AdapterError, AdapterResult};
use crate::services::verification::ChannelAdapter;

pub const VALID_CODE: &str = "123456";

/// Scriptable adapter: queued results are consumed first, then defaults apply
pub struct MockAdapter {
    pub channel: VerificationChannel,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub initiated: Arc<Mutex<Vec<VerificationTarget>>>,
    pub confirmed: Arc<Mutex<Vec<(String, String)>>>,
    pub uploaded: Arc<Mutex<Vec<(String, Option<String>)>>>,
    pub initiate_results: Mutex<VecDeque<AdapterResult<InitiateResponse>>>,
    pub resend_results: Mutex<VecDeque<AdapterResult<InitiateResponse>>>,
    pub upload_results: Mutex<VecDeque<AdapterResult<UploadResponse>>>,
    pub confirm_error: Mutex<Option<AdapterError>>,
    pub status: VerificationStatus,
    pub delay: Option<Duration>,
}

impl MockAdapter {
    pub fn new(channel: VerificationChannel) -> Self {
        Self {
            channel,
            calls: Arc::new(Mutex::new(Vec::new())),
            initiated: Arc::new(Mutex::new(Vec::new())),
            confirmed: Arc::new(Mutex::new(Vec::new())),
            uploaded: Arc::new(Mutex::new(Vec::new())),
            initiate_results: Mutex::new(VecDeque::new()),
            resend_results: Mutex::new(VecDeque::new()),
            upload_results: Mutex::new(VecDeque::new()),
            confirm_error: Mutex::new(None),
            status: VerificationStatus::NotStarted,
            delay: None,
        }
    }

    /// Every call sleeps for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_status(mut self, status: VerificationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn push_initiate(&self, result: AdapterResult<InitiateResponse>) {
        self.initiate_results.lock().unwrap().push_back(result);
    }

    pub fn push_resend(&self, result: AdapterResult<InitiateResponse>) {
        self.resend_results.lock().unwrap().push_back(result);
    }

    pub fn push_upload(&self, result: AdapterResult<UploadResponse>) {
        self.upload_results.lock().unwrap().push_back(result);
    }

    pub fn fail_confirm(&self, error: AdapterError) {
        *self.confirm_error.lock().unwrap() = Some(error);
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }

    async fn record(&self, operation: &str) {
        self.calls.lock().unwrap().push(operation.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ChannelAdapter for MockAdapter {
    fn channel(&self) -> VerificationChannel {
        self.channel
    }

    async fn initiate(&self, target: &VerificationTarget) -> AdapterResult<InitiateResponse> {
        self.record("initiate").await;
        self.initiated.lock().unwrap().push(target.clone());
        let queued = self.initiate_results.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(InitiateResponse::new("ver_123", 2)))
    }

    async fn confirm(&self, code: &OtpCode, verification_id: &str) -> AdapterResult<ConfirmResponse> {
        self.record("confirm").await;
        self.confirmed
            .lock()
            .unwrap()
            .push((code.as_str().to_string(), verification_id.to_string()));
        if let Some(error) = self.confirm_error.lock().unwrap().clone() {
            return Err(error);
        }
        if code.as_str() == VALID_CODE {
            Ok(ConfirmResponse {
                success: true,
                message: None,
            })
        } else {
            Ok(ConfirmResponse {
                success: false,
                message: Some("Invalid OTP".to_string()),
            })
        }
    }

    async fn resend(&self, _verification_id: &str) -> AdapterResult<InitiateResponse> {
        self.record("resend").await;
        let queued = self.resend_results.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(InitiateResponse::new("ver_456", 2)))
    }

    async fn upload_document(
        &self,
        document: &DocumentUpload,
        _target: &VerificationTarget,
        verification_id: Option<&str>,
    ) -> AdapterResult<UploadResponse> {
        self.record("upload").await;
        self.uploaded
            .lock()
            .unwrap()
            .push((document.file_name.clone(), verification_id.map(str::to_string)));
        let queued = self.upload_results.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| {
            Ok(UploadResponse {
                success: true,
                status: VerificationStatus::Verified,
                message: None,
            })
        })
    }

    async fn fetch_status(&self) -> AdapterResult<VerificationStatus> {
        self.record("status").await;
        Ok(self.status)
    }
}

/// Adapter implementing only the required methods
pub struct InitiateOnlyAdapter;

#[async_trait]
impl ChannelAdapter for InitiateOnlyAdapter {
    fn channel(&self) -> VerificationChannel {
        VerificationChannel::Phone
    }

    async fn initiate(&self, _target: &VerificationTarget) -> AdapterResult<InitiateResponse> {
        Ok(InitiateResponse::new("ver_1", 1))
    }

    async fn fetch_status(&self) -> AdapterResult<VerificationStatus> {
        Ok(VerificationStatus::NotStarted)
    }
}

pub fn pdf(size: usize) -> DocumentUpload {
    DocumentUpload::new("pan.pdf", "application/pdf", vec![0u8; size])
}
