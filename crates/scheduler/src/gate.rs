//! At-most-once start gate.

use std::sync::atomic::{AtomicBool, Ordering};

/// Latch ensuring a background loop runs at most once concurrently.
///
/// `try_start` succeeds for exactly one caller until `reset` is called.
/// The warmer uses this so that a second start request while a pass is
/// already active becomes a no-op instead of a duplicate pass.
#[derive(Debug, Default)]
pub struct StartGate {
    started: AtomicBool,
}

impl StartGate {
    pub fn new() -> Self {
        Self {
            started: AtomicBool::new(false),
        }
    }

    /// Claim the gate. Returns `true` for the first caller only.
    pub fn try_start(&self) -> bool {
        self.started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Release the gate so a later `try_start` can succeed again.
    pub fn reset(&self) {
        self.started.store(false, Ordering::Release);
    }
}
