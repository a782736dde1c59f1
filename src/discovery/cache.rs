//! Owned discovery cache
//!
//! Holds the last computed catalog behind a read-write lock. Readers share
//! the same `Arc` snapshot; a refresh swaps in a new one. Every
//! invalidation bumps a generation counter, and a catalog computed under an
//! older generation is never stored.

use super::error::{DiscoveryError, DiscoveryResult};
use super::types::Catalog;
use chrono::{DateTime, Utc};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct Snapshot {
    catalog: Catalog,
    computed_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    snapshot: Option<Snapshot>,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct DiscoveryCache {
    state: RwLock<State>,
}

fn poisoned() -> DiscoveryError {
    DiscoveryError::Cache("discovery cache lock poisoned".to_string())
}

impl DiscoveryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> DiscoveryResult<Option<Catalog>> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.snapshot.as_ref().map(|s| s.catalog.clone()))
    }

    /// Current invalidation generation; capture it before computing a
    /// catalog and hand it back to [`store`](Self::store)
    pub fn generation(&self) -> DiscoveryResult<u64> {
        Ok(self.state.read().map_err(|_| poisoned())?.generation)
    }

    /// Store `catalog` if no invalidation happened since `generation` was
    /// read. Returns whether it was stored.
    pub fn store(
        &self,
        catalog: Catalog,
        computed_at: DateTime<Utc>,
        generation: u64,
    ) -> DiscoveryResult<bool> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        if state.generation != generation {
            return Ok(false);
        }
        state.snapshot = Some(Snapshot {
            catalog,
            computed_at,
        });
        Ok(true)
    }

    pub fn invalidate(&self) {
        let mut state = match self.state.write() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.snapshot = None;
        state.generation = state.generation.wrapping_add(1);
    }

    /// When the cached catalog was computed, if one is cached
    pub fn computed_at(&self) -> Option<DateTime<Utc>> {
        self.state
            .read()
            .ok()
            .and_then(|s| s.snapshot.as_ref().map(|s| s.computed_at))
    }

    pub fn is_populated(&self) -> bool {
        self.computed_at().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_store_get_invalidate() {
        let cache = DiscoveryCache::new();
        assert!(cache.get().unwrap().is_none());
        assert!(!cache.is_populated());

        let catalog: Catalog = Arc::new(Vec::new());
        let now = Utc::now();
        let generation = cache.generation().unwrap();
        assert!(cache.store(catalog.clone(), now, generation).unwrap());

        let cached = cache.get().unwrap().unwrap();
        assert!(Arc::ptr_eq(&cached, &catalog));
        assert_eq!(cache.computed_at(), Some(now));

        cache.invalidate();
        assert!(cache.get().unwrap().is_none());
    }

    #[test]
    fn test_store_after_invalidation_is_discarded() {
        let cache = DiscoveryCache::new();
        let before = cache.generation().unwrap();

        cache.invalidate();
        let stale: Catalog = Arc::new(Vec::new());
        assert!(!cache.store(stale, Utc::now(), before).unwrap());
        assert!(!cache.is_populated());

        let current = cache.generation().unwrap();
        assert_ne!(current, before);
        assert!(cache.store(Arc::new(Vec::new()), Utc::now(), current).unwrap());
        assert!(cache.is_populated());
    }
}
