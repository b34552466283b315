//! Integration tests for complete verification flows

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use xh_core::{
        AdapterError, AdapterResult, ChannelAdapter, ConfirmResponse, DocumentUpload, FlowError,
        InitiateResponse, OtpCode, StepKind, UploadResponse, VerificationChannel, VerificationFlow,
        VerificationSession, VerificationStatus, VerificationTarget,
    };
    use xh_shared::VerificationConfig;

    // In-memory backend issuing one code per verification id
    struct FakeBackend {
        channel: VerificationChannel,
        next_id: AtomicU32,
        codes: Mutex<HashMap<String, String>>,
        status: Mutex<Option<VerificationStatus>>,
    }

    impl FakeBackend {
        fn new(channel: VerificationChannel) -> Self {
            Self {
                channel,
                next_id: AtomicU32::new(1),
                codes: Mutex::new(HashMap::new()),
                status: Mutex::new(None),
            }
        }

        fn issue(&self) -> InitiateResponse {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let id = format!("ver_{}", n);
            self.codes
                .lock()
                .unwrap()
                .insert(id.clone(), format!("{:06}", 100_000 + n));
            InitiateResponse::new(id, 2)
        }

        fn code_for(&self, verification_id: &str) -> String {
            self.codes.lock().unwrap()[verification_id].clone()
        }
    }

    #[async_trait]
    impl ChannelAdapter for FakeBackend {
        fn channel(&self) -> VerificationChannel {
            self.channel
        }

        async fn initiate(&self, _target: &VerificationTarget) -> AdapterResult<InitiateResponse> {
            Ok(self.issue())
        }

        async fn confirm(&self, code: &OtpCode, verification_id: &str) -> AdapterResult<ConfirmResponse> {
            let expected = self.codes.lock().unwrap().get(verification_id).cloned();
            match expected {
                Some(expected) if expected == code.as_str() => {
                    *self.status.lock().unwrap() = Some(VerificationStatus::Verified);
                    Ok(ConfirmResponse {
                        success: true,
                        message: Some("Verified".into()),
                    })
                }
                Some(_) => Ok(ConfirmResponse {
                    success: false,
                    message: Some("Invalid OTP".into()),
                }),
                None => Err(AdapterError::Server {
                    status: 404,
                    code: Some("VERIFICATION_NOT_FOUND".into()),
                    message: "Verification session not found".into(),
                }),
            }
        }

        async fn resend(&self, verification_id: &str) -> AdapterResult<InitiateResponse> {
            self.codes.lock().unwrap().remove(verification_id);
            Ok(self.issue())
        }

        async fn upload_document(
            &self,
            document: &DocumentUpload,
            _target: &VerificationTarget,
            _verification_id: Option<&str>,
        ) -> AdapterResult<UploadResponse> {
            let status = if document.content_type == "application/pdf" {
                VerificationStatus::Pending
            } else {
                VerificationStatus::Verified
            };
            *self.status.lock().unwrap() = Some(status);
            Ok(UploadResponse {
                success: true,
                status,
                message: None,
            })
        }

        async fn fetch_status(&self) -> AdapterResult<VerificationStatus> {
            Ok(self.status.lock().unwrap().unwrap_or_default())
        }
    }

    fn recorder() -> (Arc<Mutex<Vec<VerificationSession>>>, impl Fn(&VerificationSession) + Send + Sync + 'static) {
        let completed = Arc::new(Mutex::new(Vec::new()));
        let sink = completed.clone();
        (completed, move |session: &VerificationSession| {
            sink.lock().unwrap().push(session.clone())
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_phone_verification_with_resend() {
        let backend = Arc::new(FakeBackend::new(VerificationChannel::Phone));
        let (completed, on_complete) = recorder();
        let flow = VerificationFlow::new(backend.clone(), VerificationConfig::default())
            .on_complete(on_complete);

        flow.begin().unwrap();
        flow.submit_target(VerificationTarget::phone("9876543210"))
            .await
            .unwrap();
        let first_id = flow.session().verification_id.unwrap();
        let first_code = backend.code_for(&first_id);

        // Resend only once the countdown is over
        assert!(matches!(flow.resend().await, Err(FlowError::ResendNotReady { .. })));
        tokio::time::sleep(Duration::from_millis(120_500)).await;
        flow.resend().await.unwrap();
        let second_id = flow.session().verification_id.unwrap();
        assert_ne!(first_id, second_id);

        // The first code died with the resend
        assert!(flow.confirm_code(&first_code).await.is_err());
        assert_eq!(flow.step(), StepKind::Otp);

        let code = backend.code_for(&second_id);
        assert_eq!(flow.confirm_code(&code).await.unwrap(), StepKind::Verified);

        let completed = completed.lock().unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].status, VerificationStatus::Verified);
        assert_eq!(completed[0].target_value().as_deref(), Some("9876543210"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_email_change_target_requires_new_initiation() {
        let backend = Arc::new(FakeBackend::new(VerificationChannel::Email));
        let flow = VerificationFlow::new(backend.clone(), VerificationConfig::default());

        flow.begin().unwrap();
        flow.submit_target(VerificationTarget::email("old@example.com", true))
            .await
            .unwrap();
        flow.change_target().unwrap();
        assert_eq!(flow.step(), StepKind::Input);
        assert!(flow.session().verification_id.is_none());

        flow.submit_target(VerificationTarget::email("new@example.com", true))
            .await
            .unwrap();
        let id = flow.session().verification_id.unwrap();
        assert_eq!(id, "ver_2");
        flow.confirm_code(&backend.code_for(&id)).await.unwrap();

        assert_eq!(flow.display_value().as_deref(), Some("n***@example.com"));
    }

    #[tokio::test]
    async fn test_pan_upload_goes_to_manual_review() {
        let backend = Arc::new(FakeBackend::new(VerificationChannel::Pan));
        let (completed, on_complete) = recorder();
        let flow = VerificationFlow::new(backend.clone(), VerificationConfig::default())
            .on_complete(on_complete);

        flow.begin().unwrap();
        flow.submit_target(VerificationTarget::pan("abcde1234f", "Ravi Kumar"))
            .await
            .unwrap();
        flow.attach_document(DocumentUpload::new("pan.pdf", "application/pdf", vec![7; 4096]))
            .unwrap();

        assert_eq!(flow.submit_document().await.unwrap(), StepKind::Pending);
        assert_eq!(completed.lock().unwrap()[0].status, VerificationStatus::Pending);

        // A fresh flow picks up the persisted status
        let reloaded = VerificationFlow::new(backend, VerificationConfig::default());
        assert_eq!(reloaded.refresh_status().await.unwrap(), StepKind::Pending);
    }

    #[tokio::test]
    async fn test_bank_account_verification() {
        let backend = Arc::new(FakeBackend::new(VerificationChannel::Bank));
        let flow = VerificationFlow::new(backend, VerificationConfig::default());

        flow.begin().unwrap();
        let err = flow
            .submit_target(VerificationTarget::bank("12345678", "SBIN0001234", "Ravi Kumar"))
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));

        flow.submit_target(VerificationTarget::bank("123456789012", "sbin0001234", "Ravi Kumar"))
            .await
            .unwrap();
        flow.attach_document(DocumentUpload::new("cheque.png", "image/png", vec![1; 512]))
            .unwrap();
        assert_eq!(flow.submit_document().await.unwrap(), StepKind::Verified);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sessions_are_independent() {
        let phone = VerificationFlow::new(
            Arc::new(FakeBackend::new(VerificationChannel::Phone)),
            VerificationConfig::default(),
        );
        let email = VerificationFlow::new(
            Arc::new(FakeBackend::new(VerificationChannel::Email)),
            VerificationConfig::default(),
        );

        phone.begin().unwrap();
        phone
            .submit_target(VerificationTarget::phone("9876543210"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30_500)).await;

        email.begin().unwrap();
        email
            .submit_target(VerificationTarget::email("ravi@example.com", false))
            .await
            .unwrap();

        assert_eq!(phone.remaining_seconds(), 90);
        assert_eq!(email.remaining_seconds(), 120);

        phone.cancel().unwrap();
        tokio::time::sleep(Duration::from_millis(10_200)).await;
        assert_eq!(email.remaining_seconds(), 110);
        assert_eq!(email.step(), StepKind::Otp);
    }
}
