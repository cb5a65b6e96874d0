//! Resume Studio Cache Library
//!
//! Per-session preview artifact cache keyed by template id, with exclusive
//! ownership of the native content handles backing each rendered document.

mod handle;
mod preview;

pub use handle::{HandleId, PreviewData};
pub use preview::{CacheStats, PreviewArtifact, PreviewCache};
