//! OTP countdown
//!
//! - [`Countdown`] is the pure, tick-driven value
//! - [`OtpTimer`] drives a `Countdown` from a tokio interval task that stops
//!   when it reaches zero or when the handle is dropped

mod countdown;
mod otp_timer;

pub use countdown::{format_remaining, Countdown};
pub use otp_timer::OtpTimer;
