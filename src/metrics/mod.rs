//! Cache Metrics System
//!
//! Counters for both cache policies, reported through the [`CacheMetrics`]
//! trait as a `BTreeMap<String, f64>`.
//!
//! # Why BTreeMap over HashMap?
//!
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Simulator CSV exports have stable columns
//! - **Better debugging**: Consistent output makes logs more readable
//!
//! The O(log n) cost is irrelevant with ~15 metric keys.
//!
//! Metrics are plain counters updated inline by each operation. They never
//! influence eviction decisions.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lfu;
pub mod lru;

pub use lfu::LfuCacheMetrics;
pub use lru::LruCacheMetrics;

/// Common metrics tracked by both cache policies.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of `get_response` calls
    pub requests: u64,

    /// Number of `get_response` calls that found the key
    pub cache_hits: u64,

    /// Number of new keys stored
    pub insertions: u64,

    /// Number of writes that replaced the value of a resident key
    pub updates: u64,

    /// Number of keys evicted to make room for a new key
    pub evictions: u64,

    /// Number of inserts dropped because the cache has zero capacity
    pub rejected_insertions: u64,

    /// Configured capacity (number of entries)
    pub capacity: u64,
}

impl CoreCacheMetrics {
    /// Creates metrics for a cache of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity as u64,
            ..Default::default()
        }
    }

    /// Records a lookup that found the key.
    #[inline]
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find the key.
    ///
    /// Misses are derived as `requests - cache_hits`.
    #[inline]
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new key being stored.
    #[inline]
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records a write to an already-resident key.
    #[inline]
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records a capacity eviction.
    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an insert dropped by a zero-capacity cache.
    #[inline]
    pub fn record_rejection(&mut self) {
        self.rejected_insertions += 1;
    }

    /// Number of lookups that missed.
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Hit rate in `0.0..=1.0`, or 0.0 before any request.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Miss rate in `0.0..=1.0`, or 0.0 before any request.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert(
            "rejected_insertions".to_string(),
            self.rejected_insertions as f64,
        );
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.insertions > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.insertions as f64,
            );
        }

        metrics
    }
}

/// Trait that both cache policies implement for metrics reporting
///
/// Lets the simulator and the response layer collect and compare counters
/// without knowing which policy is in use.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification ("LRU" or "LFU")
    fn algorithm_name(&self) -> &'static str;
}
