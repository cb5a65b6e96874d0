//! Background cache warming.
//!
//! After the foreground request for the initial selection has had a head
//! start, a single background thread walks the catalog in order and renders
//! every template not yet cached, one at a time. Background work never
//! interrupts the user: failures are skipped silently and the pass stops
//! cooperatively when cancelled. At most one pass runs at a time.

use resume_studio_cache::PreviewCache;
use resume_studio_render::{TemplateCatalog, TemplateRenderer};
use resume_studio_scheduler::{CancellationToken, StartGate};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

/// Configuration for the background warmer.
#[derive(Debug, Clone)]
pub struct WarmerConfig {
    /// Delay before the first background render, giving the foreground
    /// request for the initial selection a contention-free head start.
    /// Default: 500ms.
    pub startup_delay: Duration,
}

impl Default for WarmerConfig {
    fn default() -> Self {
        Self {
            startup_delay: Duration::from_millis(500),
        }
    }
}

impl WarmerConfig {
    pub fn with_startup_delay(mut self, delay: Duration) -> Self {
        self.startup_delay = delay;
        self
    }
}

// Granularity of the cancellation-aware startup sleep.
const DELAY_SLICE: Duration = Duration::from_millis(25);

struct WarmerInner {
    cache: Arc<PreviewCache>,
    catalog: Arc<TemplateCatalog>,
    gate: StartGate,
    run_token: Mutex<CancellationToken>,
    cache_version: AtomicU64,
    config: WarmerConfig,
}

/// Sequential, cancellable pre-warming loop over the template catalog.
///
/// Clones share the same warmer; the coordinator hands a clone to the
/// background thread.
#[derive(Clone)]
pub struct BackgroundWarmer {
    inner: Arc<WarmerInner>,
}

impl BackgroundWarmer {
    pub fn new(
        cache: Arc<PreviewCache>,
        catalog: Arc<TemplateCatalog>,
        config: WarmerConfig,
    ) -> Self {
        Self {
            inner: Arc::new(WarmerInner {
                cache,
                catalog,
                gate: StartGate::new(),
                run_token: Mutex::new(CancellationToken::new()),
                cache_version: AtomicU64::new(0),
                config,
            }),
        }
    }

    /// Start one background warming pass.
    ///
    /// Returns `false` without doing anything if a pass is already active
    /// (or was active and has not been reset) or the catalog is empty.
    pub fn start(&self, renderer: Arc<dyn TemplateRenderer>) -> bool {
        if self.inner.catalog.is_empty() {
            return false;
        }
        if !self.inner.gate.try_start() {
            return false;
        }

        let token = CancellationToken::new();
        *self.lock_run_token() = token.clone();

        let warmer = self.clone();
        thread::Builder::new()
            .name("preview-warmer".to_string())
            .spawn(move || {
                warmer.sleep_cancellable(warmer.inner.config.startup_delay, &token);
                if token.is_cancelled() {
                    return;
                }
                warmer.warm_pass(renderer.as_ref(), &token);
            })
            .expect("failed to spawn warmer thread");

        tracing::info!(
            templates = self.inner.catalog.len(),
            "background preview warming started"
        );
        true
    }

    /// Run one warming pass on the calling thread.
    ///
    /// The cancellation flag is checked before each iteration; a render
    /// already in flight completes (its cache write is harmless) but no
    /// further templates are attempted once cancelled.
    pub fn warm_pass(&self, renderer: &dyn TemplateRenderer, token: &CancellationToken) {
        for template in self.inner.catalog.iter() {
            if token.is_cancelled() {
                break;
            }
            if self.inner.cache.has(&template.id) {
                continue;
            }

            match renderer.render(&template.id) {
                Ok(rendered) => {
                    self.inner
                        .cache
                        .put(&template.id, rendered.bytes, rendered.page_count);
                    self.bump_version();
                }
                Err(error) => {
                    // Background work must never surface errors to the user.
                    tracing::debug!(
                        template_id = template.id.as_str(),
                        %error,
                        "skipping failed background render"
                    );
                }
            }
        }
    }

    /// Cancel the active pass, if any. The "started" flag stays claimed so
    /// the pass is not restarted accidentally; see `reset`.
    pub fn cancel(&self) {
        self.lock_run_token().cancel();
    }

    /// Cancel the active pass and release the start gate, allowing a fresh
    /// pass after cache invalidation.
    pub fn reset(&self) {
        self.cancel();
        self.inner.gate.reset();
    }

    pub fn is_started(&self) -> bool {
        self.inner.gate.is_started()
    }

    /// Counter bumped whenever warming (or invalidation) changes cache
    /// contents. Consumers poll it to re-query cached artifacts, for example
    /// to pick up freshly available thumbnails, without holding payloads in
    /// reactive state.
    pub fn cache_version(&self) -> u64 {
        self.inner.cache_version.load(Ordering::Acquire)
    }

    pub fn bump_version(&self) {
        self.inner.cache_version.fetch_add(1, Ordering::AcqRel);
    }

    fn sleep_cancellable(&self, total: Duration, token: &CancellationToken) {
        let mut remaining = total;
        while !remaining.is_zero() {
            if token.is_cancelled() {
                return;
            }
            let slice = remaining.min(DELAY_SLICE);
            thread::sleep(slice);
            remaining = remaining.saturating_sub(slice);
        }
    }

    fn lock_run_token(&self) -> MutexGuard<'_, CancellationToken> {
        match self.inner.run_token.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
