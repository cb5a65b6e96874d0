//! Foreground preview generation with stale-response suppression.
//!
//! A request is split at the renderer suspension point: `begin` runs before
//! the external render call, `complete` runs when its result lands. The epoch
//! token captured by `begin` is re-checked inside `complete`; a completion
//! holding an outdated token was superseded by a newer request and must not
//! mutate the published state. That check is the entire correctness
//! mechanism for users switching templates faster than renders finish.

use resume_studio_cache::{PreviewArtifact, PreviewCache};
use resume_studio_render::{RenderError, RenderedDocument, TemplateDescriptor, TemplateRenderer};
use resume_studio_scheduler::{EpochToken, RequestEpoch};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// The preview state visible to the UI.
///
/// At any point in time this reflects either the cache entry for the
/// currently selected template or a loading/error indicator for that same
/// template, never a result for a template the user has navigated away from.
#[derive(Debug, Clone, Default)]
pub struct PreviewState {
    pub artifact: Option<PreviewArtifact>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Outcome of `begin`: either served synchronously from the cache, or a
/// pending request whose token must be passed back to `complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Published(PreviewArtifact),
    Pending(EpochToken),
}

/// Outcome of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Published(PreviewArtifact),
    Failed(String),
    Stale,
}

/// Orchestrates one foreground request: cache lookup, external render,
/// cache write, epoch-gated publish.
pub struct Generator {
    cache: Arc<PreviewCache>,
    epoch: RequestEpoch,
    state: Mutex<PreviewState>,
}

impl Generator {
    pub fn new(cache: Arc<PreviewCache>) -> Self {
        Self {
            cache,
            epoch: RequestEpoch::new(),
            state: Mutex::new(PreviewState::default()),
        }
    }

    /// Start a request for `template`.
    ///
    /// A cache hit publishes immediately; the synchronous path cannot be
    /// stale, so the hit itself needs no token. Either way a new epoch is
    /// begun, so any outstanding request for a previous selection is
    /// invalidated and can no longer overwrite what is published here.
    pub fn begin(&self, template: &TemplateDescriptor) -> RequestPhase {
        if let Some(artifact) = self.cache.get(&template.id) {
            let _ = self.epoch.begin_request();
            let mut state = self.lock_state();
            state.artifact = Some(artifact);
            state.loading = false;
            state.error = None;
            return RequestPhase::Published(artifact);
        }

        let token = self.epoch.begin_request();
        let mut state = self.lock_state();
        state.loading = true;
        state.error = None;
        RequestPhase::Pending(token)
    }

    /// Finish a pending request with the renderer's result.
    ///
    /// A successful render always lands in the cache (last-writer-wins, and
    /// a duplicate write is redundant rather than wrong), but the published
    /// state only changes if `token` is still current. Stale completions of
    /// either kind are discarded without touching visible state.
    pub fn complete(
        &self,
        template_id: &str,
        token: EpochToken,
        result: Result<RenderedDocument, RenderError>,
    ) -> Completion {
        match result {
            Ok(rendered) => {
                let artifact = self
                    .cache
                    .put(template_id, rendered.bytes, rendered.page_count);

                if !self.epoch.is_current(token) {
                    debug!(template_id, "discarding stale preview render");
                    return Completion::Stale;
                }

                let mut state = self.lock_state();
                state.artifact = Some(artifact);
                state.loading = false;
                state.error = None;
                Completion::Published(artifact)
            }
            Err(error) => {
                if !self.epoch.is_current(token) {
                    debug!(template_id, "discarding stale preview failure");
                    return Completion::Stale;
                }

                let message = error.to_string();
                let mut state = self.lock_state();
                state.loading = false;
                state.error = Some(message.clone());
                Completion::Failed(message)
            }
        }
    }

    /// Run a full request against `renderer` on the calling thread.
    pub fn request(
        &self,
        template: &TemplateDescriptor,
        renderer: &dyn TemplateRenderer,
    ) -> Completion {
        match self.begin(template) {
            RequestPhase::Published(artifact) => Completion::Published(artifact),
            RequestPhase::Pending(token) => {
                let result = renderer.render(&template.id);
                self.complete(&template.id, token, result)
            }
        }
    }

    /// Snapshot of the published preview state.
    pub fn state(&self) -> PreviewState {
        self.lock_state().clone()
    }

    /// Drop the published preview (cache invalidation / teardown path).
    pub fn clear_published(&self) {
        let mut state = self.lock_state();
        *state = PreviewState::default();
    }

    fn lock_state(&self) -> MutexGuard<'_, PreviewState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_studio_render::TemplateFormat;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn template(id: &str) -> TemplateDescriptor {
        TemplateDescriptor::new(id, id, TemplateFormat::Html, "test template")
    }

    fn rendered(marker: u8) -> RenderedDocument {
        RenderedDocument::new(vec![marker; 4], u32::from(marker))
    }

    struct CountingRenderer {
        calls: AtomicUsize,
    }

    impl CountingRenderer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TemplateRenderer for CountingRenderer {
        fn render(&self, _template_id: &str) -> Result<RenderedDocument, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(rendered(7))
        }
    }

    #[test]
    fn cache_hit_publishes_without_render() {
        let cache = Arc::new(PreviewCache::new());
        let expected = cache.put("classic", vec![1, 2, 3], 1);
        let generator = Generator::new(Arc::clone(&cache));
        let renderer = CountingRenderer::new();

        let completion = generator.request(&template("classic"), &renderer);
        assert_eq!(completion, Completion::Published(expected));
        assert_eq!(renderer.calls(), 0);

        let state = generator.state();
        assert_eq!(state.artifact, Some(expected));
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn miss_renders_caches_and_publishes() {
        let cache = Arc::new(PreviewCache::new());
        let generator = Generator::new(Arc::clone(&cache));
        let renderer = CountingRenderer::new();

        let completion = generator.request(&template("modern"), &renderer);
        assert_eq!(renderer.calls(), 1);

        let artifact = match completion {
            Completion::Published(artifact) => artifact,
            other => panic!("expected publish, got {other:?}"),
        };
        assert!(cache.has("modern"));
        let data = cache.resolve(artifact.handle).expect("handle live");
        assert_eq!(data.page_count, 7);
    }

    #[test]
    fn begin_sets_loading_on_miss() {
        let cache = Arc::new(PreviewCache::new());
        let generator = Generator::new(cache);

        let phase = generator.begin(&template("modern"));
        assert!(matches!(phase, RequestPhase::Pending(_)));
        assert!(generator.state().loading);
        assert!(generator.state().error.is_none());
    }

    #[test]
    fn superseded_success_is_discarded_but_cached() {
        let cache = Arc::new(PreviewCache::new());
        let generator = Generator::new(Arc::clone(&cache));

        let first = match generator.begin(&template("a")) {
            RequestPhase::Pending(token) => token,
            other => panic!("expected pending, got {other:?}"),
        };
        let second = match generator.begin(&template("b")) {
            RequestPhase::Pending(token) => token,
            other => panic!("expected pending, got {other:?}"),
        };

        // The request for "a" resolves after the user moved to "b".
        let completion = generator.complete("a", first, Ok(rendered(1)));
        assert_eq!(completion, Completion::Stale);

        // Cache still benefits from the completed work.
        assert!(cache.has("a"));
        // Visible state is untouched: still loading "b", nothing published.
        let state = generator.state();
        assert!(state.loading);
        assert!(state.artifact.is_none());
        assert!(state.error.is_none());

        // The current request publishes normally.
        let completion = generator.complete("b", second, Ok(rendered(2)));
        assert!(matches!(completion, Completion::Published(_)));
        let state = generator.state();
        assert!(!state.loading);
        assert_eq!(state.artifact, cache.get("b"));
    }

    #[test]
    fn superseded_failure_is_fully_silent() {
        let cache = Arc::new(PreviewCache::new());
        let generator = Generator::new(Arc::clone(&cache));

        let first = match generator.begin(&template("a")) {
            RequestPhase::Pending(token) => token,
            other => panic!("expected pending, got {other:?}"),
        };
        let _second = generator.begin(&template("b"));

        let completion = generator.complete(
            "a",
            first,
            Err(RenderError::failed("a", "engine crashed")),
        );
        assert_eq!(completion, Completion::Stale);

        let state = generator.state();
        assert!(state.error.is_none());
        assert!(state.loading);
        assert!(!cache.has("a"));
    }

    #[test]
    fn current_failure_surfaces_error_and_clears_loading() {
        let cache = Arc::new(PreviewCache::new());
        let generator = Generator::new(cache);

        let token = match generator.begin(&template("a")) {
            RequestPhase::Pending(token) => token,
            other => panic!("expected pending, got {other:?}"),
        };

        let completion =
            generator.complete("a", token, Err(RenderError::failed("a", "engine crashed")));
        let message = match completion {
            Completion::Failed(message) => message,
            other => panic!("expected failure, got {other:?}"),
        };
        assert!(message.contains("engine crashed"));

        let state = generator.state();
        assert!(!state.loading);
        assert_eq!(state.error, Some(message));
        assert!(state.artifact.is_none());
    }

    #[test]
    fn rapid_switching_publishes_only_the_last_selection() {
        // Templates B then C selected in the same tick, before either render
        // resolves; whichever order the results land in, only C publishes.
        let cache = Arc::new(PreviewCache::new());
        let generator = Generator::new(Arc::clone(&cache));

        let token_b = match generator.begin(&template("b")) {
            RequestPhase::Pending(token) => token,
            other => panic!("expected pending, got {other:?}"),
        };
        let token_c = match generator.begin(&template("c")) {
            RequestPhase::Pending(token) => token,
            other => panic!("expected pending, got {other:?}"),
        };

        assert_eq!(
            generator.complete("b", token_b, Ok(rendered(2))),
            Completion::Stale
        );
        let published = generator.complete("c", token_c, Ok(rendered(3)));
        assert!(matches!(published, Completion::Published(_)));

        let state = generator.state();
        assert_eq!(state.artifact, cache.get("c"));

        // B's artifact is available from the cache for a later re-select,
        // without another render.
        let renderer = CountingRenderer::new();
        let completion = generator.request(&template("b"), &renderer);
        assert!(matches!(completion, Completion::Published(_)));
        assert_eq!(renderer.calls(), 0);
    }

    #[test]
    fn late_completion_after_cache_hit_publish_stays_stale() {
        // A pending render for "a" is outstanding when the user selects a
        // template that is already cached. The cached selection must win:
        // the hit bumps the epoch, so "a"'s token is stale when it lands.
        let cache = Arc::new(PreviewCache::new());
        let cached_artifact = cache.put("cached", vec![5], 1);
        let generator = Generator::new(Arc::clone(&cache));

        let token_a = match generator.begin(&template("a")) {
            RequestPhase::Pending(token) => token,
            other => panic!("expected pending, got {other:?}"),
        };
        let phase = generator.begin(&template("cached"));
        assert_eq!(phase, RequestPhase::Published(cached_artifact));

        let completion = generator.complete("a", token_a, Ok(rendered(1)));
        assert_eq!(completion, Completion::Stale);
        assert_eq!(generator.state().artifact, Some(cached_artifact));
    }

    #[test]
    fn clear_published_resets_state() {
        let cache = Arc::new(PreviewCache::new());
        cache.put("a", vec![1], 1);
        let generator = Generator::new(cache);
        let renderer = CountingRenderer::new();

        generator.request(&template("a"), &renderer);
        assert!(generator.state().artifact.is_some());

        generator.clear_published();
        let state = generator.state();
        assert!(state.artifact.is_none());
        assert!(!state.loading);
        assert!(state.error.is_none());
    }
}
