//! Decoded object cache.
//!
//! The graph builder re-resolves a hash every time it is referenced, so a
//! blob shared by many trees, or a commit reachable through several merge
//! parents, is read and inflated once per path. This cache keeps the decoded
//! record per hash so repeated references skip the disk.
//!
//! Only decoded records are cached, never graph nodes: every reference still
//! becomes its own owned node, so marking and edge deduplication behave the
//! same with or without the cache.
//!
//! Used by: `GraphBuilder::with_cache()` (enabled by `--memoize`)

use std::collections::HashMap;
use std::time::Instant;

use crate::error::Result;
use crate::git::object::{DecodedObject, ObjectHash};
use crate::git::store::ObjectStore;

pub struct ObjectCache {
    /// hash -> decoded object, `None` for hashes absent from the store
    entries: HashMap<ObjectHash, Option<DecodedObject>>,
    hits: usize,
    misses: usize,
    created_at: Instant,
}

impl ObjectCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
            created_at: Instant::now(),
        }
    }

    /// Returns the cached record, loading it from `store` on first use.
    pub fn get_or_load(&mut self, store: &ObjectStore, hash: &ObjectHash) -> Result<Option<DecodedObject>> {
        if let Some(cached) = self.entries.get(hash) {
            self.hits += 1;
            return Ok(cached.clone());
        }

        self.misses += 1;
        let loaded = store.load(hash)?;
        self.entries.insert(hash.clone(), loaded.clone());
        Ok(loaded)
    }

    /// Get cache statistics for debugging
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            age_ms: self.created_at.elapsed().as_millis(),
        }
    }
}

impl Default for ObjectCache {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
    pub age_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn remembers_absent_objects() {
        let dir = TempDir::new().unwrap();
        let store = ObjectStore::new(dir.path());
        let hash: ObjectHash = "deadbeef".repeat(5).parse().unwrap();

        let mut cache = ObjectCache::new();
        assert!(cache.get_or_load(&store, &hash).unwrap().is_none());
        assert!(cache.get_or_load(&store, &hash).unwrap().is_none());

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }
}
