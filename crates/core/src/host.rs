//! Native host boundary.
//!
//! Opening a file is a host concern: the platform file dialog, reading the
//! path, parsing whatever format is behind it. The coordinator only sees the
//! parsed document plus a small summary for the UI, and a dedicated error
//! for "the user closed the dialog", which is a normal outcome rather than
//! a failure.

use resume_model::Resume;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    /// The user dismissed the file dialog without choosing anything.
    #[error("no file selected")]
    Cancelled,

    #[error("file dialog failed: {0}")]
    Dialog(String),

    #[error("failed to read file: {0}")]
    Io(String),

    #[error("failed to parse file: {0}")]
    Parse(String),
}

impl HostError {
    /// True for the dialog-dismissed outcome, which callers treat as "keep
    /// everything as it was" rather than an error to surface.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, HostError::Cancelled)
    }
}

/// Lightweight description of the opened file, shown in the UI header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSummary {
    pub name: String,
    pub email: String,
    pub format: String,
}

/// Result of a successful open: the parsed document and its summary.
#[derive(Debug, Clone)]
pub struct OpenedDocument {
    pub summary: ParsedSummary,
    pub resume: Resume,
}

impl OpenedDocument {
    pub fn new(resume: Resume, format: impl Into<String>) -> Self {
        Self {
            summary: ParsedSummary {
                name: resume.contact.name.clone(),
                email: resume.contact.email.clone(),
                format: format.into(),
            },
            resume,
        }
    }
}

/// Platform side of the file-open flow: dialog, read, parse.
pub trait NativeFileHost: Send + Sync {
    fn open_file(&self) -> Result<OpenedDocument, HostError>;
}
