//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides an LRU cache with O(1) operations for storing and
//! looking up responses. LRU is one of the most widely used cache eviction
//! algorithms due to its simplicity and good performance for workloads with
//! temporal locality.
//!
//! # Algorithm
//!
//! The cache keeps every resident entry in a single recency list, least
//! recently used at the front and most recently used at the back. Both
//! `set_response` and `get_response` move the touched entry to the back. When
//! a new key arrives at a full cache, the entry at the front is evicted.
//!
//! ```text
//!   capacity = 3
//!
//!   set 1, set 2, set 3      front [1, 2, 3] back
//!   get 1                    front [2, 3, 1] back
//!   set 4  (evicts 2)        front [3, 1, 4] back
//! ```
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - `get_response`: O(1)
//!   - `set_response`: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache
//!   - Entries live in an index-addressed arena, so there are no per-node
//!     heap allocations and no raw pointers
//!
//! # Zero Capacity
//!
//! A cache built with capacity `0` never stores anything. Writes of new keys
//! are dropped (and counted as `rejected_insertions`), so every lookup misses.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, wrap it in
//! [`SharedCache`](crate::concurrent::SharedCache) (feature `concurrent`) or
//! another mutual-exclusion primitive.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::entry::CacheEntry;
use crate::error::InvariantError;
use crate::list::{self, Arena, List, ListIter, SlotId};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use crate::storage::CacheStorage;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity. When a new key arrives at a full cache,
/// the least recently read or written key is evicted to make room.
///
/// # Examples
///
/// ```
/// use response_cache::{CacheStorage, LruCache};
///
/// let mut cache: LruCache<i64, &str> = LruCache::new(2);
///
/// cache.set_response(1, "apple");
/// cache.set_response(2, "banana");
///
/// // Reading a key makes it the most recently used
/// assert_eq!(cache.get_response(&1), Some(&"apple"));
///
/// // Adding beyond capacity evicts the least recently used key
/// cache.set_response(3, "cherry");
/// assert_eq!(cache.get_response(&2), None);
/// assert_eq!(cache.get_response(&1), Some(&"apple"));
/// assert_eq!(cache.get_response(&3), Some(&"cherry"));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    arena: Arena<CacheEntry<K, V>>,
    order: List,
    map: HashMap<K, SlotId, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache holding at most `capacity` keys.
    pub fn new(capacity: usize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(capacity, DefaultHashBuilder::default())
    }

    /// Creates a new LRU cache from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity of the cache
    /// * `hasher` - Optional hash builder; the default one is used if `None`
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        LruCache::with_hasher(config.capacity, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        debug!(capacity, "created LRU cache");
        let reserved = list::initial_capacity(capacity);
        LruCache {
            config: LruCacheConfig { capacity },
            arena: Arena::with_capacity(reserved),
            order: List::new(),
            map: HashMap::with_capacity_and_hasher(reserved, hash_builder),
            metrics: LruCacheMetrics::new(capacity),
        }
    }

    /// Maximum number of resident keys.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if `key` is resident. Does not count as an access.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Iterates over resident entries from least to most recently used.
    ///
    /// Iteration does not count as an access.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.order.iter(&self.arena),
        }
    }

    /// Evicts the least recently used entry.
    fn evict(&mut self) {
        let Some(slot) = self.order.pop_front(&mut self.arena) else {
            return;
        };
        if let Some(entry) = self.arena.remove(slot) {
            self.map.remove(&entry.key);
            self.metrics.core.record_eviction();
            trace!(
                len = self.map.len(),
                capacity = self.capacity(),
                "evicted least recently used entry"
            );
        }
    }

    /// Checks that the index, the arena and the recency list agree.
    ///
    /// Intended for tests and debugging; walks every entry.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity() {
            return Err(InvariantError::new(format!(
                "{} resident keys exceed capacity {}",
                self.map.len(),
                self.capacity()
            )));
        }
        if self.map.len() != self.order.len() || self.arena.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys, list {} nodes, arena {} slots",
                self.map.len(),
                self.order.len(),
                self.arena.len()
            )));
        }
        self.order.validate(&self.arena)?;
        for (slot, entry) in self.order.iter(&self.arena) {
            if self.map.get(&entry.key) != Some(&slot) {
                return Err(InvariantError::new("list node is not indexed by its key"));
            }
        }
        Ok(())
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheStorage<K, V> for LruCache<K, V, S> {
    fn set_response(&mut self, key: K, value: V) {
        if let Some(slot) = self.map.get(&key).copied() {
            if let Some(entry) = self.arena.get_mut(slot) {
                entry.value = value;
            }
            self.order.move_to_back(&mut self.arena, slot);
            self.metrics.core.record_update();
            return;
        }

        if self.capacity() == 0 {
            self.metrics.core.record_rejection();
            trace!("zero-capacity LRU cache dropped insert");
            return;
        }

        if self.map.len() >= self.capacity() {
            self.evict();
        }

        let slot = self.arena.insert(CacheEntry::new(key.clone(), value));
        self.order.push_back(&mut self.arena, slot);
        self.map.insert(key, slot);
        self.metrics.core.record_insertion();
    }

    fn get_response(&mut self, key: &K) -> Option<&V> {
        let Some(slot) = self.map.get(key).copied() else {
            self.metrics.core.record_miss();
            return None;
        };
        self.order.move_to_back(&mut self.arena, slot);
        self.metrics.core.record_hit();
        self.arena.get(slot).map(|entry| &entry.value)
    }
}

impl<K, V, S> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.arena.len())
            .finish()
    }
}

/// Iterator over the entries of an [`LruCache`], least recently used first.
pub struct Iter<'a, K, V> {
    inner: ListIter<'a, CacheEntry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    fn keys<V, S: BuildHasher>(cache: &LruCache<i64, V, S>) -> Vec<i64> {
        cache.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_lru_get_set() {
        let mut cache = LruCache::new(2);
        cache.set_response(1, "apple");
        cache.set_response(2, "banana");
        assert_eq!(cache.get_response(&1), Some(&"apple"));
        assert_eq!(cache.get_response(&2), Some(&"banana"));
        assert_eq!(cache.get_response(&3), None);
        cache.set_response(1, "apricot");
        assert_eq!(cache.get_response(&1), Some(&"apricot"));
        cache.set_response(3, "cherry");
        assert_eq!(cache.get_response(&2), None);
        assert_eq!(cache.get_response(&1), Some(&"apricot"));
        assert_eq!(cache.get_response(&3), Some(&"cherry"));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lru_recency_order() {
        let mut cache = LruCache::new(3);
        cache.set_response(1, 10);
        cache.set_response(2, 20);
        cache.set_response(3, 30);
        assert_eq!(keys(&cache), [1, 2, 3]);

        cache.get_response(&1);
        assert_eq!(keys(&cache), [2, 3, 1]);

        cache.set_response(3, 31);
        assert_eq!(keys(&cache), [2, 1, 3]);

        cache.set_response(4, 40);
        assert_eq!(keys(&cache), [1, 3, 4]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lru_update_does_not_evict() {
        let mut cache = LruCache::new(2);
        cache.set_response(1, 10);
        cache.set_response(2, 20);
        cache.set_response(2, 21);
        cache.set_response(1, 11);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_response(&1), Some(&11));
        assert_eq!(cache.get_response(&2), Some(&21));
    }

    #[test]
    fn test_lru_miss_does_not_reorder() {
        let mut cache = LruCache::new(2);
        cache.set_response(1, 10);
        cache.set_response(2, 20);
        assert_eq!(cache.get_response(&7), None);
        assert_eq!(keys(&cache), [1, 2]);
    }

    #[test]
    fn test_lru_zero_capacity() {
        let mut cache = LruCache::new(0);
        cache.set_response(1, "x".to_string());
        assert_eq!(cache.get_response(&1), None);
        assert!(cache.is_empty());
        assert!(!cache.contains(&1));
        cache.check_invariants().unwrap();

        let metrics = cache.metrics();
        assert_eq!(metrics.get("rejected_insertions").unwrap(), &1.0);
        assert_eq!(metrics.get("insertions").unwrap(), &0.0);
    }

    #[test]
    fn test_lru_capacity_one() {
        let mut cache = LruCache::new(1);
        cache.set_response(1, 10);
        cache.set_response(2, 20);
        assert!(!cache.contains(&1));
        assert_eq!(cache.get_response(&2), Some(&20));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_contains_is_not_an_access() {
        let mut cache = LruCache::new(2);
        cache.set_response(1, 10);
        cache.set_response(2, 20);
        assert!(cache.contains(&1));
        cache.set_response(3, 30);
        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_lru_string_keys() {
        let mut cache = LruCache::new(2);
        let key1 = String::from("apple");
        let key2 = String::from("banana");
        cache.set_response(key1.clone(), 1);
        cache.set_response(key2.clone(), 2);
        assert_eq!(cache.get_response(&key1), Some(&1));
        assert_eq!(cache.get_response(&key2), Some(&2));
    }

    #[test]
    fn test_lru_slot_reuse_after_eviction() {
        let mut cache = LruCache::new(2);
        for i in 0..100 {
            cache.set_response(i, i * 10);
        }
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.arena.len(), 2);
        assert_eq!(keys(&cache), [98, 99]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lru_metrics() {
        let mut cache = LruCache::new(2);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests").unwrap(), &0.0);
        assert_eq!(metrics.get("cache_hits").unwrap(), &0.0);
        assert_eq!(metrics.get("cache_misses").unwrap(), &0.0);

        cache.set_response(1, 1);
        cache.set_response(2, 2);
        cache.get_response(&1);
        cache.get_response(&2);
        cache.get_response(&3);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits").unwrap(), &2.0);
        assert_eq!(metrics.get("cache_misses").unwrap(), &1.0);
        assert_eq!(metrics.get("requests").unwrap(), &3.0);

        cache.set_response(1, 10);
        cache.set_response(3, 3);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("updates").unwrap(), &1.0);
        assert_eq!(metrics.get("insertions").unwrap(), &3.0);
        assert_eq!(metrics.get("evictions").unwrap(), &1.0);
        assert_eq!(cache.algorithm_name(), "LRU");
    }

    #[test]
    fn test_lru_init_from_config() {
        let cache: LruCache<i64, String> = LruCache::init(LruCacheConfig { capacity: 5 }, None);
        assert_eq!(cache.capacity(), 5);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_huge_capacity_does_not_preallocate() {
        let mut cache = LruCache::new(usize::MAX);
        cache.set_response(1, 1);
        assert_eq!(cache.capacity(), usize::MAX);
        assert_eq!(cache.get_response(&1), Some(&1));
    }

    #[test]
    fn test_lru_debug_impl() {
        let mut cache = LruCache::new(4);
        cache.set_response(1, 1);
        let debug_str = format!("{:?}", cache);
        assert!(debug_str.contains("LruCache"));
        assert!(debug_str.contains("capacity: 4"));
        assert!(debug_str.contains("len: 1"));
    }
}
