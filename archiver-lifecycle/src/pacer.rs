//! Fixed, non-adaptive delays between remote calls.

use std::fmt;
use std::time::Duration;

/// Why the pipeline is pausing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    /// Between repositories while classifying.
    Throttle,
    /// After the fork step, before deleting the original.
    ForkPropagation,
}

impl fmt::Display for PauseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PauseReason::Throttle => write!(f, "throttle"),
            PauseReason::ForkPropagation => write!(f, "fork propagation"),
        }
    }
}

pub trait Pacer {
    fn pause(&self, reason: PauseReason, duration: Duration);
}

/// Blocks the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, reason: PauseReason, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        tracing::debug!(%reason, ?duration, "waiting");
        std::thread::sleep(duration);
    }
}
