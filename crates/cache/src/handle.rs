//! Content handle store.
//!
//! Rendered documents are held behind opaque handles, modelled on loanable
//! object URLs: the cache creates a handle when it stores bytes and revokes
//! it when the entry is overwritten or cleared. Consumers resolve a handle to
//! a read-only loan of the data. A resolved loan stays readable even if the
//! handle is revoked while it is held; revocation only prevents new loans.

use std::collections::HashMap;
use std::sync::Arc;

/// Opaque identifier for one live content handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(u64);

impl HandleId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// The bytes and page count behind a handle.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewData {
    pub bytes: Vec<u8>,
    pub page_count: u32,
}

/// Owner of all live handles.
///
/// Invariant: every handle created is released exactly once, either by
/// overwrite or by a wholesale clear. Double release is counted as a bug and
/// reported by `revoke` returning `false`.
#[derive(Debug, Default)]
pub(crate) struct HandleStore {
    next_id: u64,
    live: HashMap<HandleId, Arc<PreviewData>>,
    released: u64,
}

impl HandleStore {
    pub(crate) fn create(&mut self, bytes: Vec<u8>, page_count: u32) -> HandleId {
        self.next_id += 1;
        let id = HandleId(self.next_id);
        self.live.insert(id, Arc::new(PreviewData { bytes, page_count }));
        id
    }

    /// Release a handle. Returns `true` if it was live.
    pub(crate) fn revoke(&mut self, id: HandleId) -> bool {
        let removed = self.live.remove(&id).is_some();
        if removed {
            self.released += 1;
        }
        removed
    }

    /// Release every live handle.
    pub(crate) fn revoke_all(&mut self) {
        self.released += self.live.len() as u64;
        self.live.clear();
    }

    pub(crate) fn resolve(&self, id: HandleId) -> Option<Arc<PreviewData>> {
        self.live.get(&id).cloned()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live.len()
    }

    pub(crate) fn released_count(&self) -> u64 {
        self.released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_resolve_returns_the_data() {
        let mut store = HandleStore::default();
        let id = store.create(vec![1, 2, 3], 2);

        let data = store.resolve(id).expect("handle should be live");
        assert_eq!(data.bytes, vec![1, 2, 3]);
        assert_eq!(data.page_count, 2);
        assert_eq!(store.live_count(), 1);
    }

    #[test]
    fn revoke_releases_exactly_once() {
        let mut store = HandleStore::default();
        let id = store.create(vec![0u8; 16], 1);

        assert!(store.revoke(id));
        assert!(store.resolve(id).is_none());
        assert_eq!(store.released_count(), 1);

        // Second revoke of the same handle is a reported no-op.
        assert!(!store.revoke(id));
        assert_eq!(store.released_count(), 1);
    }

    #[test]
    fn revoke_all_accounts_for_every_handle() {
        let mut store = HandleStore::default();
        let a = store.create(vec![1], 1);
        let b = store.create(vec![2], 1);
        let c = store.create(vec![3], 1);

        store.revoke_all();
        assert_eq!(store.live_count(), 0);
        assert_eq!(store.released_count(), 3);
        assert!(store.resolve(a).is_none());
        assert!(store.resolve(b).is_none());
        assert!(store.resolve(c).is_none());
    }

    #[test]
    fn resolved_loan_outlives_revocation() {
        let mut store = HandleStore::default();
        let id = store.create(vec![9, 9], 1);

        let loan = store.resolve(id).expect("live");
        store.revoke(id);

        // The loan taken before revocation is still readable.
        assert_eq!(loan.bytes, vec![9, 9]);
        // New loans are refused.
        assert!(store.resolve(id).is_none());
    }

    #[test]
    fn handle_ids_are_never_reused() {
        let mut store = HandleStore::default();
        let a = store.create(vec![1], 1);
        store.revoke(a);
        let b = store.create(vec![2], 1);
        assert_ne!(a, b);
    }
}
