//! In-memory document store.
//!
//! Holds the resume the previews are generated from. Updates are validated
//! before they replace the document: a non-empty error list means the draft
//! was rejected and the stored document is unchanged, so the caller can
//! surface every field error at once without losing the user's edits.
//! Validation rules themselves are a collaborator concern, injected behind
//! `DraftValidator`.

use resume_model::{Resume, ValidationError};
use std::sync::{Mutex, MutexGuard};

/// External validation rules applied to a draft before it is committed.
pub trait DraftValidator: Send + Sync {
    fn validate(&self, draft: &Resume) -> Vec<ValidationError>;
}

/// The baseline rules the original application enforces: contact name and
/// email must be present.
pub struct RequiredFieldsValidator;

impl DraftValidator for RequiredFieldsValidator {
    fn validate(&self, draft: &Resume) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if draft.contact.name.is_empty() {
            errors.push(ValidationError::required("contact.name", "Name is required"));
        }
        if draft.contact.email.is_empty() {
            errors.push(ValidationError::required(
                "contact.email",
                "Email is required",
            ));
        }
        errors
    }
}

pub struct DocumentStore {
    resume: Mutex<Option<Resume>>,
    validator: Box<dyn DraftValidator>,
}

impl DocumentStore {
    pub fn new(validator: Box<dyn DraftValidator>) -> Self {
        Self {
            resume: Mutex::new(None),
            validator,
        }
    }

    pub fn with_required_fields() -> Self {
        Self::new(Box::new(RequiredFieldsValidator))
    }

    /// Install a freshly parsed document (file open / change file).
    pub fn load(&self, resume: Resume) {
        *self.lock() = Some(resume);
    }

    pub fn get(&self) -> Option<Resume> {
        self.lock().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    /// Validate and commit a draft.
    ///
    /// Returns the validation errors; an empty list means the draft replaced
    /// the stored document. On any error the store is left untouched.
    pub fn update(&self, draft: Resume) -> Vec<ValidationError> {
        let errors = self.validator.validate(&draft);
        if errors.is_empty() {
            *self.lock() = Some(draft);
        }
        errors
    }

    /// Drop the stored document (change file / full reset).
    pub fn reset(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<Resume>> {
        match self.resume.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
