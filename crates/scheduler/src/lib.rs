//! Resume Studio Scheduler Library
//!
//! Coordination primitives for the preview pipeline: the request epoch that
//! detects stale asynchronous completions, cooperative cancellation tokens,
//! and the at-most-once start gate used by the background warmer.
//!
//! # Example
//!
//! ```
//! use resume_studio_scheduler::RequestEpoch;
//!
//! let epoch = RequestEpoch::new();
//!
//! let first = epoch.begin_request();
//! let second = epoch.begin_request();
//!
//! // The first request was superseded before it completed; its result
//! // must be discarded.
//! assert!(!epoch.is_current(first));
//! assert!(epoch.is_current(second));
//! ```

mod cancel;
mod epoch;
mod gate;

pub use cancel::CancellationToken;
pub use epoch::{EpochToken, RequestEpoch};
pub use gate::StartGate;
