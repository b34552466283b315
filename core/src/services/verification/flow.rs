//! Verification step controller
//!
//! One [`VerificationFlow`] owns one [`VerificationSession`] and moves it
//! through `display → input → otp | upload → verified | pending`. Every
//! channel-specific detail is delegated to the [`ChannelAdapter`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use xh_shared::VerificationConfig;

use crate::domain::entities::{
    StepKind, VerificationChannel, VerificationSession, VerificationStatus, VerificationStep,
};
use crate::domain::value_objects::{DocumentUpload, OtpCode, VerificationTarget};
use crate::errors::{AdapterError, FlowError, FlowResult, ValidationError};
use crate::services::timer::{format_remaining, Countdown, OtpTimer};

use super::traits::ChannelAdapter;
use super::types::CompletionCallback;

/// Mutable state guarded by the flow's lock; never held across an `.await`
struct FlowState {
    session: VerificationSession,
    timer: Option<OtpTimer>,
    /// Bumped whenever the current attempt is abandoned, so responses to
    /// requests started before the bump are discarded
    generation: u64,
}

impl FlowState {
    fn abandon(&mut self) {
        self.generation += 1;
        self.timer = None;
    }

    /// Records the inline message for `error` and hands it back
    fn fail(&mut self, error: FlowError) -> FlowError {
        if error.is_surfaced() {
            self.session.attempt_error = Some(error.user_message());
        }
        error
    }
}

/// Clears the "is submitting" flag when the in-flight operation ends
struct SubmitGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Channel-agnostic verification state machine
pub struct VerificationFlow<A: ChannelAdapter + ?Sized> {
    adapter: Arc<A>,
    channel: VerificationChannel,
    config: VerificationConfig,
    state: Mutex<FlowState>,
    submitting: AtomicBool,
    on_complete: Option<CompletionCallback>,
}

impl<A: ChannelAdapter + ?Sized> VerificationFlow<A> {
    /// Create a flow in the display step
    pub fn new(adapter: Arc<A>, config: VerificationConfig) -> Self {
        Self::with_status(adapter, config, VerificationStatus::NotStarted)
    }

    /// Create a flow whose initial step reflects the persisted `status`
    pub fn with_status(adapter: Arc<A>, config: VerificationConfig, status: VerificationStatus) -> Self {
        let channel = adapter.channel();
        Self {
            adapter,
            channel,
            config,
            state: Mutex::new(FlowState {
                session: VerificationSession::with_status(channel, status),
                timer: None,
                generation: 0,
            }),
            submitting: AtomicBool::new(false),
            on_complete: None,
        }
    }

    /// Set the value already on file, shown masked and used to prefill the input step
    pub fn with_current_value(self, target: VerificationTarget) -> Self {
        self.lock().session.current = Some(target);
        self
    }

    /// Register the callback run when the session reaches `verified` or `pending`
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&VerificationSession) + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(callback));
        self
    }

    pub fn channel(&self) -> VerificationChannel {
        self.channel
    }

    pub fn step(&self) -> StepKind {
        self.lock().session.step_kind()
    }

    /// Snapshot of the session
    pub fn session(&self) -> VerificationSession {
        self.lock().session.clone()
    }

    /// Inline error from the last failed operation
    pub fn error(&self) -> Option<String> {
        self.lock().session.attempt_error.clone()
    }

    /// Code field contents, when in the OTP step
    pub fn code(&self) -> Option<String> {
        self.lock().session.step.code().map(str::to_string)
    }

    /// Masked target under verification, or the value on file
    pub fn display_value(&self) -> Option<String> {
        self.lock().session.masked_value()
    }

    /// Seconds left before a new code may be requested; zero without a timer
    pub fn remaining_seconds(&self) -> u64 {
        self.lock().timer.as_ref().map_or(0, OtpTimer::remaining)
    }

    /// Remaining seconds formatted as `M:SS`
    pub fn formatted_remaining(&self) -> String {
        format_remaining(self.remaining_seconds())
    }

    /// Whether the resend action is enabled
    pub fn can_resend(&self) -> bool {
        let state = self.lock();
        state.session.step_kind() == StepKind::Otp
            && state.timer.as_ref().map_or(true, OtpTimer::can_resend)
    }

    /// Whether the countdown task is alive
    pub fn is_timer_running(&self) -> bool {
        self.lock().timer.as_ref().map_or(false, OtpTimer::is_running)
    }

    /// Observe the countdown, when one is running
    pub fn subscribe_timer(&self) -> Option<watch::Receiver<u64>> {
        self.lock().timer.as_ref().map(OtpTimer::subscribe)
    }

    /// Whether an operation is in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// `display → input`, prefilling the value on file
    pub fn begin(&self) -> FlowResult<StepKind> {
        let mut state = self.lock();
        let step = state.session.step_kind();
        if step != StepKind::Display {
            return Err(FlowError::InvalidTransition {
                action: "start verification",
                step,
            });
        }

        let draft = state.session.current.clone();
        state.session.attempt_error = None;
        state.session.step = VerificationStep::Input { draft };
        tracing::debug!(
            channel = %self.channel,
            session_id = %state.session.id,
            event = "verification_input_opened",
            "Opened verification input"
        );
        Ok(StepKind::Input)
    }

    /// Return to display, discarding edits, the verification id and any error
    pub fn cancel(&self) -> FlowResult<StepKind> {
        let mut state = self.lock();
        match state.session.step_kind() {
            StepKind::Display => Ok(StepKind::Display),
            StepKind::Input | StepKind::Otp | StepKind::Upload => {
                state.abandon();
                state.session.clear_attempt();
                state.session.step = VerificationStep::Display;
                tracing::debug!(
                    channel = %self.channel,
                    session_id = %state.session.id,
                    event = "verification_cancelled",
                    "Verification cancelled"
                );
                Ok(StepKind::Display)
            }
            step => Err(FlowError::InvalidTransition {
                action: "cancel",
                step,
            }),
        }
    }

    /// Validate `target` and start a verification for it
    ///
    /// On success the flow moves to `otp` with a fresh countdown (code
    /// channels) or to `upload` (document channels). On any failure it stays in
    /// `input`, keeping the submitted value as the draft.
    pub async fn submit_target(&self, target: VerificationTarget) -> FlowResult<StepKind> {
        let _guard = SubmitGuard::acquire(&self.submitting).ok_or(FlowError::Busy)?;

        let (generation, validated) = {
            let mut state = self.lock();
            let step = state.session.step_kind();
            if step != StepKind::Input {
                return Err(FlowError::InvalidTransition {
                    action: "submit a target",
                    step,
                });
            }
            state.session.step = VerificationStep::Input {
                draft: Some(target.clone()),
            };

            let validated = match self.validate_target(&target) {
                Ok(validated) => validated,
                Err(e) => {
                    tracing::debug!(
                        channel = %self.channel,
                        error = %e,
                        event = "target_validation_failed",
                        "Verification target rejected locally"
                    );
                    return Err(state.fail(e.into()));
                }
            };
            state.session.attempt_error = None;
            (state.generation, validated)
        };

        let result = self.adapter.initiate(&validated).await;

        let mut state = self.lock();
        if state.generation != generation {
            return Err(FlowError::Abandoned);
        }
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    channel = %self.channel,
                    session_id = %state.session.id,
                    target = %validated.masked(),
                    error = %e,
                    event = "verification_initiate_failed",
                    "Failed to initiate verification"
                );
                return Err(state.fail(FlowError::Initiation(e)));
            }
        };

        let minutes = response
            .expires_in_minutes
            .unwrap_or(self.config.default_expires_in_minutes);

        if self.channel.uses_otp() {
            let Some(verification_id) = response.verification_id else {
                return Err(state.fail(FlowError::Initiation(AdapterError::Decode(
                    "missing verification id".into(),
                ))));
            };
            state.session.verification_id = Some(verification_id);
            state.session.set_expiry_minutes(minutes);
            state.timer = Some(self.start_timer(minutes));
            state.session.step = VerificationStep::Otp {
                code: String::new(),
            };
        } else {
            state.session.verification_id = response.verification_id;
            state.session.expires_at = None;
            if let Some(minutes) = response.expires_in_minutes {
                state.session.set_expiry_minutes(minutes);
            }
            state.session.step = VerificationStep::Upload { document: None };
        }

        tracing::info!(
            channel = %self.channel,
            session_id = %state.session.id,
            target = %validated.masked(),
            next_step = %state.session.step_kind(),
            expires_in_minutes = minutes,
            event = "verification_initiated",
            "Verification initiated"
        );
        state.session.target = Some(validated);
        state.session.attempt_error = None;
        Ok(state.session.step_kind())
    }

    /// Update the code field; keeps ASCII digits only, at most six
    pub fn set_code(&self, input: &str) -> FlowResult<String> {
        if self.is_submitting() {
            return Err(FlowError::Busy);
        }
        let mut state = self.lock();
        match &mut state.session.step {
            VerificationStep::Otp { code } => {
                *code = OtpCode::sanitize_input(input);
                Ok(code.clone())
            }
            step => Err(FlowError::InvalidTransition {
                action: "enter a code",
                step: step.kind(),
            }),
        }
    }

    /// Enter `code` and confirm it
    pub async fn confirm_code(&self, code: &str) -> FlowResult<StepKind> {
        self.set_code(code)?;
        self.submit_code().await
    }

    /// Confirm the entered code
    ///
    /// Success moves to `verified` and runs the completion callback. Failure
    /// stays in `otp` with an empty code field.
    pub async fn submit_code(&self) -> FlowResult<StepKind> {
        let _guard = SubmitGuard::acquire(&self.submitting).ok_or(FlowError::Busy)?;

        let (generation, code, verification_id) = {
            let mut state = self.lock();
            let entered = match &state.session.step {
                VerificationStep::Otp { code } => code.clone(),
                step => {
                    return Err(FlowError::InvalidTransition {
                        action: "submit a code",
                        step: step.kind(),
                    })
                }
            };
            let code = match OtpCode::parse(&entered) {
                Ok(code) => code,
                Err(e) => return Err(state.fail(e.into())),
            };
            let Some(verification_id) = state.session.verification_id.clone() else {
                return Err(FlowError::InvalidTransition {
                    action: "submit a code",
                    step: StepKind::Otp,
                });
            };
            state.session.attempt_error = None;
            (state.generation, code, verification_id)
        };

        let result = self.adapter.confirm(&code, &verification_id).await;

        let snapshot = {
            let mut state = self.lock();
            if state.generation != generation {
                return Err(FlowError::Abandoned);
            }
            let outcome = match result {
                Ok(response) if response.success => Ok(()),
                Ok(response) => Err(AdapterError::Rejected(
                    response
                        .message
                        .unwrap_or_else(|| "Invalid verification code".to_string()),
                )),
                Err(e) => Err(e),
            };
            if let Err(e) = outcome {
                state.session.step = VerificationStep::Otp {
                    code: String::new(),
                };
                tracing::warn!(
                    channel = %self.channel,
                    session_id = %state.session.id,
                    error = %e,
                    event = "verification_confirm_failed",
                    "Verification code rejected"
                );
                return Err(state.fail(FlowError::Confirmation(e)));
            }

            state.timer = None;
            state.session.step = VerificationStep::Verified;
            state.session.status = VerificationStatus::Verified;
            state.session.attempt_error = None;
            state.session.current = state.session.target.clone();
            tracing::info!(
                channel = %self.channel,
                session_id = %state.session.id,
                event = "verification_completed",
                "Channel verified"
            );
            state.session.clone()
        };

        self.notify_complete(&snapshot);
        Ok(StepKind::Verified)
    }

    /// Request a new code once the countdown reached zero
    ///
    /// Before that the call is a no-op reported as `ResendNotReady`. On
    /// success the countdown restarts with the new expiry and the code field
    /// is cleared; on failure the countdown is not restarted.
    pub async fn resend(&self) -> FlowResult<StepKind> {
        let _guard = SubmitGuard::acquire(&self.submitting).ok_or(FlowError::Busy)?;

        let (generation, verification_id) = {
            let state = self.lock();
            let step = state.session.step_kind();
            if step != StepKind::Otp {
                return Err(FlowError::InvalidTransition {
                    action: "resend a code",
                    step,
                });
            }
            let remaining = state.timer.as_ref().map_or(0, OtpTimer::remaining);
            if remaining > 0 {
                return Err(FlowError::ResendNotReady {
                    remaining_secs: remaining,
                });
            }
            let Some(verification_id) = state.session.verification_id.clone() else {
                return Err(FlowError::InvalidTransition {
                    action: "resend a code",
                    step,
                });
            };
            (state.generation, verification_id)
        };

        let result = self.adapter.resend(&verification_id).await;

        let mut state = self.lock();
        if state.generation != generation {
            return Err(FlowError::Abandoned);
        }
        match result {
            Ok(response) => {
                let minutes = response
                    .expires_in_minutes
                    .unwrap_or(self.config.default_expires_in_minutes);
                if let Some(verification_id) = response.verification_id {
                    state.session.verification_id = Some(verification_id);
                }
                state.session.set_expiry_minutes(minutes);
                state.timer = Some(self.start_timer(minutes));
                state.session.step = VerificationStep::Otp {
                    code: String::new(),
                };
                state.session.attempt_error = None;
                tracing::info!(
                    channel = %self.channel,
                    session_id = %state.session.id,
                    expires_in_minutes = minutes,
                    event = "verification_code_resent",
                    "Verification code resent"
                );
                Ok(StepKind::Otp)
            }
            Err(e) => {
                tracing::warn!(
                    channel = %self.channel,
                    session_id = %state.session.id,
                    error = %e,
                    event = "verification_resend_failed",
                    "Failed to resend verification code"
                );
                Err(state.fail(FlowError::Resend(e)))
            }
        }
    }

    /// `otp → input`, keeping the submitted value as the draft
    ///
    /// The verification id is dropped without notifying the server; a fresh
    /// initiation is required.
    pub fn change_target(&self) -> FlowResult<StepKind> {
        let mut state = self.lock();
        let step = state.session.step_kind();
        if step != StepKind::Otp {
            return Err(FlowError::InvalidTransition {
                action: "change the target",
                step,
            });
        }
        state.abandon();
        let draft = state.session.target.take();
        state.session.clear_attempt();
        state.session.step = VerificationStep::Input { draft };
        Ok(StepKind::Input)
    }

    /// Attach the document for the upload step after checking type and size
    ///
    /// A rejected file is not accepted; any previously attached file stays.
    pub fn attach_document(&self, document: DocumentUpload) -> FlowResult<StepKind> {
        if self.is_submitting() {
            return Err(FlowError::Busy);
        }
        let mut state = self.lock();
        let step = state.session.step_kind();
        if step != StepKind::Upload {
            return Err(FlowError::InvalidTransition {
                action: "attach a document",
                step,
            });
        }
        if let Err(e) = document.validate(&self.config) {
            tracing::debug!(
                channel = %self.channel,
                file_name = %document.file_name,
                size = document.size(),
                error = %e,
                event = "document_rejected",
                "Document rejected locally"
            );
            return Err(state.fail(e.into()));
        }
        state.session.step = VerificationStep::Upload {
            document: Some(document),
        };
        state.session.attempt_error = None;
        Ok(StepKind::Upload)
    }

    /// Upload the attached document and request verification
    ///
    /// The resulting step follows the status the backend reports: `verified`
    /// or `pending` (manual review). Failure stays in `upload` with the file
    /// and the validated target preserved.
    pub async fn submit_document(&self) -> FlowResult<StepKind> {
        let _guard = SubmitGuard::acquire(&self.submitting).ok_or(FlowError::Busy)?;

        let (generation, document, target, verification_id) = {
            let mut state = self.lock();
            let document = match &state.session.step {
                VerificationStep::Upload { document } => document.clone(),
                step => {
                    return Err(FlowError::InvalidTransition {
                        action: "submit a document",
                        step: step.kind(),
                    })
                }
            };
            let Some(document) = document else {
                return Err(state.fail(ValidationError::NoDocument.into()));
            };
            let Some(target) = state.session.target.clone() else {
                return Err(FlowError::InvalidTransition {
                    action: "submit a document",
                    step: StepKind::Upload,
                });
            };
            state.session.attempt_error = None;
            (
                state.generation,
                document,
                target,
                state.session.verification_id.clone(),
            )
        };

        let result = self
            .adapter
            .upload_document(&document, &target, verification_id.as_deref())
            .await;

        let snapshot = {
            let mut state = self.lock();
            if state.generation != generation {
                return Err(FlowError::Abandoned);
            }
            let outcome = match result {
                Ok(response) if response.success => match response.status {
                    status @ (VerificationStatus::Verified | VerificationStatus::Pending) => Ok(status),
                    _ => Err(AdapterError::Rejected(
                        response
                            .message
                            .unwrap_or_else(|| "Document verification failed".to_string()),
                    )),
                },
                Ok(response) => Err(AdapterError::Rejected(
                    response
                        .message
                        .unwrap_or_else(|| "Document verification failed".to_string()),
                )),
                Err(e) => Err(e),
            };
            let status = match outcome {
                Ok(status) => status,
                Err(e) => {
                    tracing::warn!(
                        channel = %self.channel,
                        session_id = %state.session.id,
                        error = %e,
                        event = "document_upload_failed",
                        "Document upload failed"
                    );
                    return Err(state.fail(FlowError::Upload(e)));
                }
            };

            state.session.step = status.initial_step();
            state.session.status = status;
            state.session.attempt_error = None;
            state.session.current = state.session.target.clone();
            tracing::info!(
                channel = %self.channel,
                session_id = %state.session.id,
                target = %target.masked(),
                status = %status,
                event = "document_submitted",
                "Document submitted for verification"
            );
            state.session.clone()
        };

        self.notify_complete(&snapshot);
        Ok(snapshot.step_kind())
    }

    /// External reset back to `display` from any step
    pub fn reset(&self) -> StepKind {
        let mut state = self.lock();
        state.abandon();
        state.session.clear_attempt();
        state.session.step = VerificationStep::Display;
        StepKind::Display
    }

    /// Reload the persisted status and restart from the matching step
    pub async fn refresh_status(&self) -> FlowResult<StepKind> {
        let _guard = SubmitGuard::acquire(&self.submitting).ok_or(FlowError::Busy)?;

        let result = self.adapter.fetch_status().await;

        let mut state = self.lock();
        match result {
            Ok(status) => {
                state.abandon();
                state.session.clear_attempt();
                state.session.status = status;
                state.session.step = status.initial_step();
                tracing::debug!(
                    channel = %self.channel,
                    status = %status,
                    event = "verification_status_loaded",
                    "Loaded verification status"
                );
                Ok(state.session.step_kind())
            }
            Err(e) => Err(state.fail(FlowError::Status(e))),
        }
    }

    fn validate_target(&self, target: &VerificationTarget) -> Result<VerificationTarget, ValidationError> {
        if target.channel() != self.channel {
            return Err(ValidationError::ChannelMismatch {
                expected: self.channel,
                actual: target.channel(),
            });
        }
        target.validated()
    }

    fn start_timer(&self, minutes: u32) -> OtpTimer {
        let period = Duration::from_millis(self.config.tick_interval_ms.max(1));
        OtpTimer::start(Countdown::from_minutes(minutes).remaining(), period)
    }

    fn notify_complete(&self, session: &VerificationSession) {
        if let Some(callback) = &self.on_complete {
            callback(session);
        }
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
