//! Verification flow for a single channel
//!
//! The [`VerificationFlow`] drives one session through its steps, delegates
//! every backend call to a [`ChannelAdapter`] and owns the resend countdown.

mod flow;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use flow::VerificationFlow;
pub use traits::ChannelAdapter;
pub use types::CompletionCallback;
