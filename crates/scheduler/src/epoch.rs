//! Monotonic request epoch for stale-response detection.
//!
//! Every foreground preview request captures a token at issue time and
//! compares it against the live epoch at completion time. Any completion
//! holding an outdated token was superseded by a newer request and must not
//! touch visible state. This turns "last request wins" into a single integer
//! comparison with no queueing or cancellation plumbing.

use std::sync::atomic::{AtomicU64, Ordering};

/// Token captured when a request is issued.
///
/// Tokens are only meaningful against the `RequestEpoch` that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochToken(u64);

impl EpochToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Strictly increasing, process-wide request counter.
///
/// There is one epoch per gallery, not one per template: switching templates
/// invalidates any outstanding foreground request, including one for a
/// different template than the new target, because only one preview is
/// visible at a time.
#[derive(Debug, Default)]
pub struct RequestEpoch {
    value: AtomicU64,
}

impl RequestEpoch {
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    /// Increment the epoch and return the new value as this request's token.
    pub fn begin_request(&self) -> EpochToken {
        EpochToken(self.value.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// True iff `token` matches the epoch value right now.
    pub fn is_current(&self, token: EpochToken) -> bool {
        self.value.load(Ordering::Acquire) == token.0
    }

    pub fn current(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_request_increments_monotonically() {
        let epoch = RequestEpoch::new();
        let a = epoch.begin_request();
        let b = epoch.begin_request();
        let c = epoch.begin_request();

        assert_eq!(a.value(), 1);
        assert_eq!(b.value(), 2);
        assert_eq!(c.value(), 3);
        assert_eq!(epoch.current(), 3);
    }

    #[test]
    fn only_the_latest_token_is_current() {
        let epoch = RequestEpoch::new();
        let first = epoch.begin_request();
        assert!(epoch.is_current(first));

        let second = epoch.begin_request();
        assert!(!epoch.is_current(first));
        assert!(epoch.is_current(second));
    }

    #[test]
    fn tokens_stay_stale_forever() {
        let epoch = RequestEpoch::new();
        let old = epoch.begin_request();
        for _ in 0..10 {
            epoch.begin_request();
        }
        assert!(!epoch.is_current(old));
    }

    #[test]
    fn epoch_is_shared_across_threads() {
        use std::sync::Arc;

        let epoch = Arc::new(RequestEpoch::new());
        let mut handles = Vec::new();
        for _ in 0..4 {
            let epoch = Arc::clone(&epoch);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    epoch.begin_request();
                }
            }));
        }
        for handle in handles {
            handle.join().expect("thread panicked");
        }
        assert_eq!(epoch.current(), 400);
    }
}
