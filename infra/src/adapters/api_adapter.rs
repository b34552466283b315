//! Channel adapter backed by the verification API

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::info;

use xh_core::{
    AdapterError, AdapterResult, ChannelAdapter, ConfirmResponse, DocumentUpload,
    InitiateResponse, OtpCode, UploadResponse, VerificationChannel, VerificationStatus,
    VerificationTarget,
};
use xh_shared::ApiResponse;

use super::payload::{self, ConfirmRequest, ResendRequest, StatusData, UploadData};
use crate::http::ApiClient;

/// Calls `{prefix}/{channel}/{operation}` on the backend
///
/// Several adapters may share one [`ApiClient`].
pub struct HttpChannelAdapter {
    channel: VerificationChannel,
    client: Arc<ApiClient>,
}

impl HttpChannelAdapter {
    pub fn new(channel: VerificationChannel, client: Arc<ApiClient>) -> Self {
        Self { channel, client }
    }

    fn unsupported(&self, operation: &'static str) -> AdapterError {
        AdapterError::Unsupported {
            channel: self.channel,
            operation,
        }
    }
}

#[async_trait]
impl ChannelAdapter for HttpChannelAdapter {
    fn channel(&self) -> VerificationChannel {
        self.channel
    }

    async fn initiate(&self, target: &VerificationTarget) -> AdapterResult<InitiateResponse> {
        let envelope = self
            .client
            .post_json(self.channel, "initiate", &payload::initiate_body(target))
            .await?;
        let response: InitiateResponse = require_data(envelope)?;

        info!(
            channel = %self.channel,
            target = %target.masked(),
            expires_in_minutes = ?response.expires_in_minutes,
            event = "verification_requested",
            "Verification requested"
        );
        Ok(response)
    }

    async fn confirm(&self, code: &OtpCode, verification_id: &str) -> AdapterResult<ConfirmResponse> {
        if !self.channel.uses_otp() {
            return Err(self.unsupported("confirm"));
        }
        let request = ConfirmRequest {
            verification_id,
            code: code.as_str(),
        };
        let envelope: ApiResponse<Value> = self.client.post_json(self.channel, "verify", &request).await?;

        Ok(ConfirmResponse {
            success: envelope.success,
            message: envelope.message.or(envelope.error),
        })
    }

    async fn resend(&self, verification_id: &str) -> AdapterResult<InitiateResponse> {
        if !self.channel.uses_otp() {
            return Err(self.unsupported("resend"));
        }
        let envelope = self
            .client
            .post_json(self.channel, "resend", &ResendRequest { verification_id })
            .await?;
        require_data(envelope)
    }

    async fn upload_document(
        &self,
        document: &DocumentUpload,
        target: &VerificationTarget,
        verification_id: Option<&str>,
    ) -> AdapterResult<UploadResponse> {
        if self.channel.uses_otp() {
            return Err(self.unsupported("upload_document"));
        }

        let part = Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str(&document.content_type)
            .map_err(|_| AdapterError::Rejected(format!("Unsupported file type: {}", document.content_type)))?;
        let mut form = Form::new().part("document", part);
        for (name, value) in payload::document_fields(target) {
            form = form.text(name, value);
        }
        if let Some(verification_id) = verification_id {
            form = form.text("verificationId", verification_id.to_string());
        }

        info!(
            channel = %self.channel,
            target = %target.masked(),
            file_name = %document.file_name,
            size = document.size(),
            event = "document_upload_started",
            "Uploading verification document"
        );
        let envelope: ApiResponse<UploadData> =
            self.client.post_multipart(self.channel, "upload", form).await?;

        let success = envelope.success;
        let status = envelope
            .data
            .unwrap_or_default()
            .status
            .unwrap_or(if success {
                VerificationStatus::Verified
            } else {
                VerificationStatus::Failed
            });
        Ok(UploadResponse {
            success,
            status,
            message: envelope.message.or(envelope.error),
        })
    }

    async fn fetch_status(&self) -> AdapterResult<VerificationStatus> {
        let envelope = self.client.get(self.channel, "status").await?;
        let data: StatusData = require_data(envelope)?;
        Ok(data.status)
    }
}

/// The `data` of a successful envelope
fn require_data<T>(envelope: ApiResponse<T>) -> AdapterResult<T> {
    if !envelope.success {
        return Err(AdapterError::Rejected(envelope.failure_message()));
    }
    envelope
        .into_data()
        .ok_or_else(|| AdapterError::Decode("response has no data".to_string()))
}
