//! reqwest client for the backend verification API
//!
//! Every endpoint answers with the `{ success, data?, message?, error? }`
//! envelope; non-2xx answers carry an [`ErrorResponse`] body.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use xh_core::{AdapterError, AdapterResult, VerificationChannel};
use xh_shared::{ApiConfig, ApiResponse, ErrorResponse};

use crate::InfrastructureError;

/// Shared HTTP client, one per backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Build a client with the configured timeout and bearer token
    pub fn new(config: ApiConfig) -> Result<Self, InfrastructureError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.auth_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim())).map_err(|_| {
                InfrastructureError::Config("EXTRAHAND_API_TOKEN contains invalid characters".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// URL of `operation` for `channel`
    pub fn endpoint(&self, channel: VerificationChannel, operation: &str) -> String {
        self.config.endpoint(channel.as_str(), operation)
    }

    /// POST a JSON body
    pub async fn post_json<B, T>(
        &self,
        channel: VerificationChannel,
        operation: &str,
        body: &B,
    ) -> AdapterResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.endpoint(channel, operation)).json(body);
        self.send(request, channel, operation).await
    }

    /// POST a multipart form
    pub async fn post_multipart<T>(
        &self,
        channel: VerificationChannel,
        operation: &str,
        form: Form,
    ) -> AdapterResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let request = self.http.post(self.endpoint(channel, operation)).multipart(form);
        self.send(request, channel, operation).await
    }

    /// GET without a body
    pub async fn get<T>(&self, channel: VerificationChannel, operation: &str) -> AdapterResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let request = self.http.get(self.endpoint(channel, operation));
        self.send(request, channel, operation).await
    }

    async fn send<T>(
        &self,
        request: RequestBuilder,
        channel: VerificationChannel,
        operation: &str,
    ) -> AdapterResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_transport_error)?;

        let result = decode_envelope(status, &body);
        match &result {
            Ok(envelope) => debug!(
                channel = %channel,
                operation,
                status,
                success = envelope.success,
                event = "api_request_completed",
                "Verification API request completed"
            ),
            Err(e) => warn!(
                channel = %channel,
                operation,
                status,
                error = %e,
                event = "api_request_failed",
                "Verification API request failed"
            ),
        }
        result
    }
}

/// Decode a response body given its HTTP status
pub(crate) fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> AdapterResult<ApiResponse<T>> {
    if !(200..300).contains(&status) {
        let (code, message) = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(error) => {
                let code = Some(error.error.trim().to_string()).filter(|c| !c.is_empty());
                let message = error.display_message().unwrap_or_default().to_string();
                (code, message)
            }
            Err(_) => (None, String::new()),
        };
        return Err(AdapterError::Server { status, code, message });
    }

    serde_json::from_str(body).map_err(|e| AdapterError::Decode(e.to_string()))
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> AdapterError {
    if error.is_timeout() {
        AdapterError::Network("request timed out".to_string())
    } else if error.is_decode() {
        AdapterError::Decode(error.to_string())
    } else {
        AdapterError::Network(error.to_string())
    }
}
