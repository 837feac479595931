//! Policy-selected response cache.
//!
//! [`ResponseCache`] picks LRU or LFU once, at construction, and then behaves
//! like either through [`CacheStorage`]. This is the handle a response-caching
//! layer holds: it is keyed by [`QueryIndex`] and stores response bodies as
//! `String` by default.
//!
//! ```
//! use response_cache::config::EvictionPolicy;
//! use response_cache::{CacheStorage, ResponseCache};
//!
//! let mut cache: ResponseCache = ResponseCache::new(EvictionPolicy::Lru, 2);
//! cache.set_response(17, "{\"answer\":42}".to_string());
//! assert_eq!(
//!     cache.get_response(&17).map(String::as_str),
//!     Some("{\"answer\":42}")
//! );
//! assert_eq!(cache.get_response(&18), None);
//! ```

extern crate alloc;

use crate::config::{EvictionPolicy, ResponseCacheConfig};
use crate::error::InvariantError;
use crate::lfu::LfuCache;
use crate::lru::LruCache;
use crate::metrics::CacheMetrics;
use crate::storage::CacheStorage;
use crate::QueryIndex;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A cache whose eviction policy is chosen when it is built.
#[derive(Debug)]
pub enum ResponseCache<K = QueryIndex, V = String, S = DefaultHashBuilder> {
    /// Least recently used eviction.
    Lru(LruCache<K, V, S>),
    /// Least frequently used eviction.
    Lfu(LfuCache<K, V, S>),
}

impl<K: Hash + Eq, V> ResponseCache<K, V> {
    /// Creates an empty cache with the given policy and capacity.
    pub fn new(policy: EvictionPolicy, capacity: usize) -> Self {
        Self::with_hasher(policy, capacity, DefaultHashBuilder::default())
    }

    /// Creates an empty cache from a [`ResponseCacheConfig`].
    pub fn from_config(config: ResponseCacheConfig) -> Self {
        Self::new(config.policy, config.capacity)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ResponseCache<K, V, S> {
    /// Creates an empty cache with a custom hash builder.
    pub fn with_hasher(policy: EvictionPolicy, capacity: usize, hash_builder: S) -> Self {
        match policy {
            EvictionPolicy::Lru => ResponseCache::Lru(LruCache::with_hasher(capacity, hash_builder)),
            EvictionPolicy::Lfu => ResponseCache::Lfu(LfuCache::with_hasher(capacity, hash_builder)),
        }
    }

    /// The eviction policy backing this cache.
    pub fn policy(&self) -> EvictionPolicy {
        match self {
            ResponseCache::Lru(_) => EvictionPolicy::Lru,
            ResponseCache::Lfu(_) => EvictionPolicy::Lfu,
        }
    }

    pub fn capacity(&self) -> usize {
        match self {
            ResponseCache::Lru(cache) => cache.capacity(),
            ResponseCache::Lfu(cache) => cache.capacity(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResponseCache::Lru(cache) => cache.len(),
            ResponseCache::Lfu(cache) => cache.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is resident. Does not count as an access.
    pub fn contains(&self, key: &K) -> bool {
        match self {
            ResponseCache::Lru(cache) => cache.contains(key),
            ResponseCache::Lfu(cache) => cache.contains(key),
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match self {
            ResponseCache::Lru(cache) => cache.check_invariants(),
            ResponseCache::Lfu(cache) => cache.check_invariants(),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheStorage<K, V> for ResponseCache<K, V, S> {
    #[inline]
    fn set_response(&mut self, key: K, value: V) {
        match self {
            ResponseCache::Lru(cache) => cache.set_response(key, value),
            ResponseCache::Lfu(cache) => cache.set_response(key, value),
        }
    }

    #[inline]
    fn get_response(&mut self, key: &K) -> Option<&V> {
        match self {
            ResponseCache::Lru(cache) => cache.get_response(key),
            ResponseCache::Lfu(cache) => cache.get_response(key),
        }
    }
}

impl<K, V, S> CacheMetrics for ResponseCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        match self {
            ResponseCache::Lru(cache) => cache.metrics(),
            ResponseCache::Lfu(cache) => cache.metrics(),
        }
    }

    fn algorithm_name(&self) -> &'static str {
        match self {
            ResponseCache::Lru(cache) => cache.algorithm_name(),
            ResponseCache::Lfu(cache) => cache.algorithm_name(),
        }
    }
}

impl<K, V, S> From<LruCache<K, V, S>> for ResponseCache<K, V, S> {
    fn from(cache: LruCache<K, V, S>) -> Self {
        ResponseCache::Lru(cache)
    }
}

impl<K, V, S> From<LfuCache<K, V, S>> for ResponseCache<K, V, S> {
    fn from(cache: LfuCache<K, V, S>) -> Self {
        ResponseCache::Lfu(cache)
    }
}
