//! In-memory caches for grid-point and forecast lookups
//!
//! Both caches use the same policy: a hard capacity and, when an insert of a
//! new key would exceed it, the whole cache is cleared first. There is no LRU
//! bookkeeping. A burst of distinct coordinates costs hit rate for a while but
//! memory stays bounded.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clock::Clock;

struct CacheEntry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// Capacity-bounded map with optional time-to-live
pub struct BoundedCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    capacity: usize,
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> BoundedCache<V> {
    /// Create an empty cache. `ttl: None` means entries never expire.
    pub fn new(capacity: usize, ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            ttl,
            clock,
        }
    }

    /// Get a value if present and not expired
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if self.is_fresh(entry) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Store a value stamped with the current time
    pub fn put(&mut self, key: &str, value: V) {
        if !self.entries.contains_key(key) && self.entries.len() >= self.capacity {
            log::debug!(
                "Cache reached capacity ({}), clearing {} entries",
                self.capacity,
                self.entries.len()
            );
            self.entries.clear();
        }

        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: self.clock.now(),
            },
        );
    }

    /// Remove a single entry, returning whether it existed
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, including expired ones not yet replaced
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry<V>) -> bool {
        match self.ttl {
            None => true,
            Some(ttl) => {
                // A clock that moved backwards reads as age zero
                let age = (self.clock.now() - entry.stored_at)
                    .to_std()
                    .unwrap_or_default();
                age < ttl
            }
        }
    }
}
