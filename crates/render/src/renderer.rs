//! External renderer contract.

use thiserror::Error;

/// Output of one render call: the document bytes and the page count the
/// engine reported for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: u32,
}

impl RenderedDocument {
    pub fn new(bytes: Vec<u8>, page_count: u32) -> Self {
        Self { bytes, page_count }
    }
}

/// Failure reported by the external renderer.
///
/// Every variant carries the template id so callers can tell which request
/// failed after the fact; completions may arrive long after the user has
/// navigated elsewhere.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("template '{template_id}' not found")]
    TemplateNotFound { template_id: String },

    #[error("no resume loaded")]
    NoDocument,

    #[error("render failed for template '{template_id}': {message}")]
    Failed { template_id: String, message: String },
}

impl RenderError {
    pub fn failed(template_id: &str, message: impl Into<String>) -> Self {
        Self::Failed {
            template_id: template_id.to_string(),
            message: message.into(),
        }
    }
}

/// The opaque external render engine.
///
/// Implementations must be safely callable repeatedly for the same template
/// id and produce stable output for a fixed underlying document; the preview
/// cache relies on duplicate renders being redundant rather than divergent.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template_id: &str) -> Result<RenderedDocument, RenderError>;
}
