//! Integration tests running the verification flow over the mock adapter

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use xh_core::{
    DocumentUpload, FlowError, StepKind, VerificationChannel, VerificationFlow,
    VerificationStatus, VerificationTarget,
};
use xh_infra::{init_tracing, MockChannelAdapter};
use xh_shared::{LoggingConfig, VerificationConfig};

fn init_logging() {
    // Another test may have installed the subscriber already
    let _ = init_tracing(&LoggingConfig::default());
}

#[tokio::test]
async fn test_complete_phone_workflow() {
    init_logging();
    let adapter = Arc::new(MockChannelAdapter::new(VerificationChannel::Phone));
    let completed = Arc::new(AtomicUsize::new(0));
    let counter = completed.clone();
    let flow = VerificationFlow::new(adapter.clone(), VerificationConfig::default())
        .on_complete(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    flow.begin().unwrap();
    flow.submit_target(VerificationTarget::phone("9876543210"))
        .await
        .unwrap();
    assert_eq!(flow.step(), StepKind::Otp);
    assert_eq!(flow.formatted_remaining(), "2:00");

    let verification_id = flow.session().verification_id.unwrap();
    let code = adapter.code_for(&verification_id).unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let err = flow.confirm_code(wrong).await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid OTP");
    assert_eq!(flow.code().as_deref(), Some(""));

    assert_eq!(flow.confirm_code(&code).await.unwrap(), StepKind::Verified);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
    assert_eq!(adapter.request_count(), 3);
}

#[tokio::test]
async fn test_network_failure_is_recoverable() {
    init_logging();
    let adapter = Arc::new(MockChannelAdapter::new(VerificationChannel::Email).with_fixed_code("424242"));
    let flow = VerificationFlow::new(adapter.clone(), VerificationConfig::default());
    flow.begin().unwrap();

    adapter.set_simulate_failure(true);
    let err = flow
        .submit_target(VerificationTarget::email("ravi@example.com", true))
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Initiation(_)));
    assert_eq!(flow.step(), StepKind::Input);

    adapter.set_simulate_failure(false);
    flow.submit_target(VerificationTarget::email("ravi@example.com", true))
        .await
        .unwrap();
    assert_eq!(flow.confirm_code("424242").await.unwrap(), StepKind::Verified);
}

#[tokio::test]
async fn test_aadhaar_document_workflow() {
    init_logging();
    let adapter = Arc::new(
        MockChannelAdapter::new(VerificationChannel::Aadhaar)
            .with_upload_status(VerificationStatus::Pending),
    );
    let flow = VerificationFlow::new(adapter.clone(), VerificationConfig::default());

    flow.begin().unwrap();
    flow.submit_target(VerificationTarget::aadhaar("2345 6789 0123", "Ravi Kumar"))
        .await
        .unwrap();
    assert_eq!(flow.step(), StepKind::Upload);
    assert_eq!(flow.display_value().as_deref(), Some("XXXX XXXX 0123"));

    flow.attach_document(DocumentUpload::new("aadhaar.jpg", "image/jpeg", vec![0xFF; 1024]))
        .unwrap();
    assert_eq!(flow.submit_document().await.unwrap(), StepKind::Pending);

    let reloaded = VerificationFlow::new(adapter, VerificationConfig::default());
    assert_eq!(reloaded.refresh_status().await.unwrap(), StepKind::Pending);
}
