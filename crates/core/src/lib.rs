//! Resume Studio Core Library
//!
//! Preview generation and caching pipeline for the resume gallery: the
//! epoch-gated foreground generator, the background cache warmer, selection
//! handling, and the coordinator that ties them to the document store and
//! native host.

pub mod document;
pub mod gallery;
pub mod generator;
pub mod host;
pub mod selection;
pub mod warmer;

pub use document::{DocumentStore, DraftValidator, RequiredFieldsValidator};
pub use gallery::{CommitOutcome, GalleryConfig, GalleryCoordinator};
pub use generator::{Completion, Generator, PreviewState, RequestPhase};
pub use host::{HostError, NativeFileHost, OpenedDocument, ParsedSummary};
pub use selection::{is_text_input_focus, NavKey, SelectionController};
pub use warmer::{BackgroundWarmer, WarmerConfig};
