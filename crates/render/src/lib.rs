//! Resume Studio Render Boundary
//!
//! The preview pipeline treats the document renderer as an opaque external
//! engine. This crate owns that boundary: the `TemplateRenderer` trait, its
//! result and error types, and the fixed per-session template catalog that
//! defines render and navigation order.

mod catalog;
mod renderer;

pub use catalog::{TemplateCatalog, TemplateDescriptor, TemplateFormat};
pub use renderer::{RenderError, RenderedDocument, TemplateRenderer};
