//! Session template catalog.
//!
//! The set of templates is provided once per loaded document and fixed for
//! the session. Catalog order is authoritative: it defines both navigation
//! order in the gallery and the order the background warmer walks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFormat {
    Html,
    Latex,
    Docx,
}

/// Immutable description of one selectable rendering template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub format: TemplateFormat,
    pub description: String,
}

impl TemplateDescriptor {
    pub fn new(
        id: &str,
        display_name: &str,
        format: TemplateFormat,
        description: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            format,
            description: description.to_string(),
        }
    }
}

/// Ordered, immutable set of templates for one session.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<TemplateDescriptor>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<TemplateDescriptor>) -> Self {
        Self { templates }
    }

    pub fn list(&self) -> &[TemplateDescriptor] {
        &self.templates
    }

    pub fn get(&self, index: usize) -> Option<&TemplateDescriptor> {
        self.templates.get(index)
    }

    pub fn by_id(&self, id: &str) -> Option<&TemplateDescriptor> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.templates.iter().position(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TemplateCatalog {
        TemplateCatalog::new(vec![
            TemplateDescriptor::new(
                "classic-html",
                "Classic",
                TemplateFormat::Html,
                "Single-column classic layout",
            ),
            TemplateDescriptor::new(
                "modern-html",
                "Modern",
                TemplateFormat::Html,
                "Two-column modern layout",
            ),
            TemplateDescriptor::new(
                "plain-latex",
                "Plain",
                TemplateFormat::Latex,
                "Minimal LaTeX layout",
            ),
        ])
    }

    #[test]
    fn catalog_preserves_insertion_order() {
        let catalog = catalog();
        let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["classic-html", "modern-html", "plain-latex"]);
    }

    #[test]
    fn lookup_by_id_and_index_agree() {
        let catalog = catalog();
        assert_eq!(catalog.index_of("modern-html"), Some(1));
        assert_eq!(
            catalog.by_id("modern-html").map(|t| t.display_name.as_str()),
            Some("Modern")
        );
        assert_eq!(catalog.get(1).map(|t| t.id.as_str()), Some("modern-html"));
        assert!(catalog.by_id("unknown").is_none());
    }

    #[test]
    fn descriptor_serializes_display_name_in_camel_case() {
        let descriptor = TemplateDescriptor::new(
            "classic-html",
            "Classic",
            TemplateFormat::Html,
            "Single-column classic layout",
        );
        let json = serde_json::to_value(&descriptor).expect("serialize");
        assert_eq!(json["displayName"], "Classic");
        assert_eq!(json["format"], "html");
    }

    #[test]
    fn empty_catalog_reports_empty() {
        let catalog = TemplateCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.get(0).is_none());
    }
}
