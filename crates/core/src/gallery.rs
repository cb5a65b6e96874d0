//! Gallery coordinator.
//!
//! Wires the pieces together: selection drives the foreground generator,
//! the warmer fills the rest of the catalog behind it, and document edits
//! or file changes invalidate every cached preview before rendering starts
//! over. This is the one type the host application talks to.

use crate::document::DocumentStore;
use crate::generator::{Completion, Generator, PreviewState};
use crate::host::{HostError, NativeFileHost, ParsedSummary};
use crate::selection::{NavKey, SelectionController};
use crate::warmer::{BackgroundWarmer, WarmerConfig};
use resume_model::{Resume, ValidationError};
use resume_studio_cache::{HandleId, PreviewArtifact, PreviewCache, PreviewData};
use resume_studio_render::{TemplateCatalog, TemplateDescriptor, TemplateRenderer};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Coordinator configuration. Currently just the warmer knobs.
#[derive(Debug, Clone, Default)]
pub struct GalleryConfig {
    pub warmer: WarmerConfig,
}

/// Result of committing an edited draft.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The draft was accepted; every cached preview was invalidated and the
    /// current selection is being re-rendered.
    Committed,
    /// The draft was rejected; the document and the previews are unchanged.
    Rejected(Vec<ValidationError>),
}

pub struct GalleryCoordinator {
    catalog: Arc<TemplateCatalog>,
    cache: Arc<PreviewCache>,
    generator: Generator,
    warmer: BackgroundWarmer,
    store: DocumentStore,
    selection: Mutex<SelectionController>,
    renderer: Arc<dyn TemplateRenderer>,
}

impl GalleryCoordinator {
    pub fn new(
        catalog: Arc<TemplateCatalog>,
        renderer: Arc<dyn TemplateRenderer>,
        config: GalleryConfig,
    ) -> Self {
        let cache = Arc::new(PreviewCache::new());
        let generator = Generator::new(Arc::clone(&cache));
        let warmer = BackgroundWarmer::new(
            Arc::clone(&cache),
            Arc::clone(&catalog),
            config.warmer,
        );
        let selection = Mutex::new(SelectionController::new(catalog.len()));

        Self {
            catalog,
            cache,
            generator,
            warmer,
            store: DocumentStore::with_required_fields(),
            selection,
            renderer,
        }
    }

    /// Bring the gallery up: render the initial selection in the foreground,
    /// then kick off background warming for the rest of the catalog.
    pub fn mount(&self) -> Option<Completion> {
        let completion = self.request_current();
        self.warmer.start(Arc::clone(&self.renderer));
        completion
    }

    /// Jump to `index` (clamped). A changed selection triggers a preview
    /// request; re-selecting the current template does not.
    pub fn select(&self, index: usize) -> Option<usize> {
        let moved = {
            let mut selection = self.lock_selection();
            let before = selection.current();
            let after = selection.select(index);
            (after != before).then_some(after).flatten()
        };
        if moved.is_some() {
            self.request_current();
        }
        moved
    }

    pub fn prev(&self) -> Option<usize> {
        let moved = self.lock_selection().prev();
        if moved.is_some() {
            self.request_current();
        }
        moved
    }

    pub fn next(&self) -> Option<usize> {
        let moved = self.lock_selection().next();
        if moved.is_some() {
            self.request_current();
        }
        moved
    }

    pub fn handle_key(&self, key: NavKey, focus_in_text_input: bool) -> Option<usize> {
        let moved = self.lock_selection().handle_key(key, focus_in_text_input);
        if moved.is_some() {
            self.request_current();
        }
        moved
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.lock_selection().current()
    }

    pub fn selected_template(&self) -> Option<TemplateDescriptor> {
        let index = self.selected_index()?;
        self.catalog.get(index).cloned()
    }

    pub fn preview_state(&self) -> PreviewState {
        self.generator.state()
    }

    /// See [`BackgroundWarmer::cache_version`].
    pub fn cache_version(&self) -> u64 {
        self.warmer.cache_version()
    }

    /// Artifact for `template_id` if it is currently cached. Used by the
    /// gallery strip to show thumbnails as warming fills them in.
    pub fn cached_artifact(&self, template_id: &str) -> Option<PreviewArtifact> {
        self.cache.get(template_id)
    }

    /// Borrow the payload behind a live handle.
    pub fn resolve(&self, handle: HandleId) -> Option<Arc<PreviewData>> {
        self.cache.resolve(handle)
    }

    pub fn document(&self) -> Option<Resume> {
        self.store.get()
    }

    /// Validate and commit an edited draft. Acceptance invalidates every
    /// cached preview, since they all depict the old document.
    pub fn commit_draft(&self, draft: Resume) -> CommitOutcome {
        let errors = self.store.update(draft);
        if !errors.is_empty() {
            return CommitOutcome::Rejected(errors);
        }
        info!("draft committed, invalidating previews");
        self.invalidate_previews();
        CommitOutcome::Committed
    }

    /// Run the host's file-open flow.
    ///
    /// A dismissed dialog returns `Ok(None)` and leaves every piece of state
    /// exactly as it was. A successful open replaces the document and
    /// invalidates all previews.
    pub fn open_file(
        &self,
        host: &dyn NativeFileHost,
    ) -> Result<Option<ParsedSummary>, HostError> {
        let opened = match host.open_file() {
            Ok(opened) => opened,
            Err(error) if error.is_cancelled() => return Ok(None),
            Err(error) => return Err(error),
        };

        info!(name = opened.summary.name.as_str(), "opened resume file");
        self.store.load(opened.resume);
        self.invalidate_previews();
        Ok(Some(opened.summary))
    }

    /// Throw away every cached preview and start rendering from scratch:
    /// stop the warmer, clear the cache (releasing all handles), re-render
    /// the current selection in the foreground, then warm again.
    pub fn invalidate_previews(&self) {
        self.warmer.reset();
        self.cache.clear();
        self.warmer.bump_version();
        self.generator.clear_published();
        self.request_current();
        self.warmer.start(Arc::clone(&self.renderer));
    }

    /// Stop background work and release every preview handle.
    pub fn teardown(&self) {
        self.warmer.cancel();
        self.cache.clear();
        self.generator.clear_published();
    }

    fn request_current(&self) -> Option<Completion> {
        let template = self.selected_template()?;
        Some(self.generator.request(&template, self.renderer.as_ref()))
    }

    fn lock_selection(&self) -> MutexGuard<'_, SelectionController> {
        match self.selection.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Drop for GalleryCoordinator {
    fn drop(&mut self) {
        self.teardown();
    }
}
