//! Responses returned by channel adapters.

use serde::{Deserialize, Serialize};

use crate::domain::entities::VerificationStatus;

/// Result of an initiate or resend call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateResponse {
    /// Token to send with later resend / verify calls
    #[serde(default)]
    pub verification_id: Option<String>,

    /// Code lifetime; the flow falls back to its configured default when absent
    #[serde(default)]
    pub expires_in_minutes: Option<u32>,
}

impl InitiateResponse {
    pub fn new(verification_id: impl Into<String>, expires_in_minutes: u32) -> Self {
        Self {
            verification_id: Some(verification_id.into()),
            expires_in_minutes: Some(expires_in_minutes),
        }
    }
}

/// Result of a code confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a combined document upload + verify call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub status: VerificationStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initiate_response_from_camel_case() {
        let response: InitiateResponse =
            serde_json::from_str(r#"{"verificationId":"ver_1","expiresInMinutes":2}"#).unwrap();
        assert_eq!(response, InitiateResponse::new("ver_1", 2));

        let response: InitiateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.verification_id.is_none());
        assert!(response.expires_in_minutes.is_none());
    }

    #[test]
    fn test_upload_response_status() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"success":true,"status":"pending"}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.status, VerificationStatus::Pending);
    }
}
