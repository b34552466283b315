//! Tick-driven countdown value

/// Seconds remaining until a new code may be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
}

impl Countdown {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            remaining: duration_secs,
        }
    }

    /// Countdown for a server TTL given in minutes
    pub fn from_minutes(minutes: u32) -> Self {
        Self::new(u64::from(minutes) * 60)
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Removes one second, never going below zero
    pub fn tick(&mut self) -> u64 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Resend is enabled exactly when the countdown reached zero
    pub fn can_resend(&self) -> bool {
        self.is_finished()
    }

    pub fn formatted(&self) -> String {
        format_remaining(self.remaining)
    }
}

/// Formats seconds as `M:SS`
pub fn format_remaining(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
