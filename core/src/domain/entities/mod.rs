//! Domain entities describing a verification attempt.

pub mod channel;
pub mod session;
pub mod status;
pub mod step;

// Re-export commonly used types
pub use channel::VerificationChannel;
pub use session::VerificationSession;
pub use status::VerificationStatus;
pub use step::{StepKind, VerificationStep};
