//! Product Cache Module
//!
//! Main cache engine combining HashMap storage with FIFO eviction and TTL
//! expiration. Used to avoid re-scraping the same product within a short
//! window.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder, MAX_KEY_LENGTH};
use crate::error::{GateError, Result};
use crate::product::Product;

// == Cache Hit ==
/// A successful lookup: the cached product plus how long it stays fresh.
#[derive(Debug, Clone)]
pub struct CacheHit {
    /// The cached product record
    pub product: Product,
    /// Remaining TTL in whole seconds
    pub ttl_remaining: u64,
}

// == Product Cache ==
/// Bounded in-memory product cache with FIFO eviction and a fixed TTL.
///
/// Eviction is oldest-by-insertion, not least-recently-used: reads never
/// refresh an entry's position. Overwriting a key is a delete+insert, so it
/// restarts both the TTL and the insertion position.
#[derive(Debug)]
pub struct ProductCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Insertion order tracker for FIFO eviction
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL in seconds applied to every entry
    ttl: u64,
}

impl ProductCache {
    // == Constructor ==
    /// Creates a new ProductCache with the given capacity and TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of products the cache can hold
    /// * `ttl` - TTL in seconds applied to every inserted product
    pub fn new(max_entries: usize, ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
        }
    }

    // == Get ==
    /// Retrieves a cached product by key.
    ///
    /// Returns the product if present and not expired. An expired entry is
    /// removed on the way out (lazy eviction) and reported as `Expired`; an
    /// absent key is reported as `NotFound`. Both count as misses.
    pub fn get(&mut self, key: &str) -> Result<CacheHit> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                self.order.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                return Err(GateError::Expired(key.to_string()));
            }

            let hit = CacheHit {
                product: entry.product.clone(),
                ttl_remaining: entry.ttl_remaining(),
            };
            self.stats.record_hit();
            debug!(key = %key, "cache hit");
            Ok(hit)
        } else {
            self.stats.record_miss();
            Err(GateError::NotFound(key.to_string()))
        }
    }

    // == Insert ==
    /// Stores a product under the given key.
    ///
    /// If the key already exists, the entry is replaced and its TTL and
    /// insertion position restart. If the cache is at capacity, expired
    /// entries are dropped first; if none were, the oldest-inserted entry is
    /// evicted.
    pub fn insert(&mut self, key: String, product: Product) -> Result<()> {
        if key.is_empty() {
            return Err(GateError::InvalidRequest("Key cannot be empty".to_string()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(GateError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            // Reclaim expired entries before sacrificing a live one
            if self.cleanup_expired() == 0 {
                if let Some(evicted_key) = self.order.evict_oldest() {
                    self.entries.remove(&evicted_key);
                    self.stats.record_eviction();
                    debug!(key = %evicted_key, "evicted oldest entry");
                }
            }
        }

        let entry = CacheEntry::new(product, self.ttl);
        self.entries.insert(key.clone(), entry);
        self.order.record(&key);

        self.stats.set_total_entries(self.entries.len());
        debug!(key = %key, "cache set");

        Ok(())
    }

    // == Remove ==
    /// Removes an entry by key.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
            Ok(())
        } else {
            Err(GateError::NotFound(key.to_string()))
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.order.remove(&key);
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Clear ==
    /// Removes every entry, leaving counters intact.
    pub fn clear(&mut self) {
        self.entries.clear();
        while self.order.evict_oldest().is_some() {}
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
