//! Types shared by the verification flow

use std::sync::Arc;

use crate::domain::entities::VerificationSession;

/// Invoked with a snapshot of the session when it reaches `verified` or `pending`
pub type CompletionCallback = Arc<dyn Fn(&VerificationSession) + Send + Sync>;
