//! Services driving a verification attempt.

pub mod timer;
pub mod verification;

// Re-export commonly used types
pub use timer::{format_remaining, Countdown, OtpTimer};
pub use verification::{ChannelAdapter, CompletionCallback, VerificationFlow};
