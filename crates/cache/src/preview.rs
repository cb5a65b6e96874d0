//! Preview artifact cache keyed by template id.
//!
//! One entry per template at most. Inserting over an existing key releases
//! the old handle before the new one is installed, so no two live handles
//! ever exist for the same key. The cache is the only component that creates
//! or releases handles; everything else works with read-only loans.
//!
//! Contents live for one session only and are wiped wholesale when the
//! underlying document changes.

use crate::handle::{HandleId, HandleStore, PreviewData};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A cached rendered document: the content handle plus its page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewArtifact {
    pub handle: HandleId,
    pub page_count: u32,
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of templates currently cached
    pub entry_count: usize,

    /// Number of live content handles
    pub live_handles: usize,

    /// Number of handles released so far (overwrites and clears)
    pub released_handles: u64,

    /// Number of cache hits
    pub hits: u64,

    /// Number of cache misses
    pub misses: u64,
}

struct CacheState {
    entries: HashMap<String, PreviewArtifact>,
    handles: HandleStore,
    hits: u64,
    misses: u64,
}

impl CacheState {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            handles: HandleStore::default(),
            hits: 0,
            misses: 0,
        }
    }
}

/// Thread-safe preview cache.
///
/// # Example
///
/// ```
/// use resume_studio_cache::PreviewCache;
///
/// let cache = PreviewCache::new();
///
/// let artifact = cache.put("classic-html", vec![0x25, 0x50, 0x44, 0x46], 1);
/// assert!(cache.has("classic-html"));
///
/// let data = cache.resolve(artifact.handle).expect("handle is live");
/// assert_eq!(data.page_count, 1);
/// ```
pub struct PreviewCache {
    state: Mutex<CacheState>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CacheState::new()),
        }
    }

    /// Look up the artifact for a template. Pure apart from hit/miss stats.
    pub fn get(&self, template_id: &str) -> Option<PreviewArtifact> {
        let mut state = self.lock();
        match state.entries.get(template_id).copied() {
            Some(artifact) => {
                state.hits += 1;
                Some(artifact)
            }
            None => {
                state.misses += 1;
                None
            }
        }
    }

    /// Store rendered bytes for a template and return the fresh artifact.
    ///
    /// If an entry already exists for this template, its handle is released
    /// before the new one is created. Empty bytes are accepted and stored
    /// as a zero-length artifact; validation is the renderer's job.
    pub fn put(&self, template_id: &str, bytes: Vec<u8>, page_count: u32) -> PreviewArtifact {
        let mut state = self.lock();

        if let Some(old) = state.entries.remove(template_id) {
            state.handles.revoke(old.handle);
        }

        let handle = state.handles.create(bytes, page_count);
        let artifact = PreviewArtifact { handle, page_count };
        state.entries.insert(template_id.to_string(), artifact);
        artifact
    }

    /// Check for an entry without touching hit/miss stats.
    pub fn has(&self, template_id: &str) -> bool {
        self.lock().entries.contains_key(template_id)
    }

    /// Resolve a handle to a read-only loan of the rendered data.
    ///
    /// Returns `None` once the handle has been revoked by an overwrite or
    /// `clear`. A loan taken before revocation stays readable.
    pub fn resolve(&self, handle: HandleId) -> Option<Arc<PreviewData>> {
        self.lock().handles.resolve(handle)
    }

    /// Release every held handle exactly once and empty the mapping.
    ///
    /// Safe to call on an already-empty cache.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.handles.revoke_all();
        state.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            entry_count: state.entries.len(),
            live_handles: state.handles.live_count(),
            released_handles: state.handles.released_count(),
            hits: state.hits,
            misses: state.misses,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        // Lock poisoning only happens if a holder panicked; the state is
        // plain data, so continuing with it is sound.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new()
    }
}
