//! Countdown driven by a scoped tokio task

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::countdown::{format_remaining, Countdown};

/// Running OTP countdown
///
/// Must be started inside a tokio runtime. The tick task ends on its own at
/// zero and is aborted when the handle is dropped, so no tick outlives it.
pub struct OtpTimer {
    duration_secs: u64,
    remaining: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl OtpTimer {
    /// Starts counting down from `duration_secs`, one tick per `period`
    pub fn start(duration_secs: u64, period: Duration) -> Self {
        let (tx, rx) = watch::channel(duration_secs);
        let task = tokio::spawn(run_countdown(Countdown::new(duration_secs), period, tx));
        Self {
            duration_secs,
            remaining: rx,
            task,
        }
    }

    /// Starts a one-tick-per-second countdown for a TTL given in minutes
    pub fn from_minutes(minutes: u32) -> Self {
        Self::start(Countdown::from_minutes(minutes).remaining(), Duration::from_secs(1))
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn remaining(&self) -> u64 {
        *self.remaining.borrow()
    }

    pub fn can_resend(&self) -> bool {
        self.remaining() == 0
    }

    pub fn formatted(&self) -> String {
        format_remaining(self.remaining())
    }

    /// Receiver that observes every published value
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.remaining.clone()
    }

    /// Whether the tick task is still alive
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for OtpTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for OtpTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpTimer")
            .field("duration_secs", &self.duration_secs)
            .field("remaining", &self.remaining())
            .finish()
    }
}

async fn run_countdown(mut countdown: Countdown, period: Duration, tx: watch::Sender<u64>) {
    if countdown.is_finished() {
        return;
    }

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let remaining = countdown.tick();
        if tx.send(remaining).is_err() {
            // Every receiver is gone
            break;
        }
        if remaining == 0 {
            tracing::debug!(event = "otp_timer_elapsed", "OTP countdown reached zero");
            break;
        }
    }
}
