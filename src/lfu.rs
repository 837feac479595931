//! Least Frequently Used Cache Implementation.
//!
//! The LFU (Least Frequently Used) cache evicts the least frequently accessed
//! key when a new key arrives at a full cache. Every resident key carries an
//! access frequency, and keys sharing a frequency are kept in recency order so
//! ties are broken by evicting the one touched longest ago.
//!
//! # Algorithm
//!
//! ```text
//!   buckets: BTreeMap<frequency, List>      min_frequency = 1
//!
//!   1 ─► front [k2, k3] back                  (k2 evicted first)
//!   3 ─► front [k1] back
//! ```
//!
//! - A new key enters the frequency-1 bucket at the back, and `min_frequency`
//!   drops to 1.
//! - A hit, or a write to a resident key, moves the key from bucket `f` to the
//!   back of bucket `f + 1`. If bucket `f` becomes empty it is removed, and if
//!   `f` was the minimum the minimum becomes `f + 1`.
//! - Eviction pops the front of the `min_frequency` bucket.
//!
//! Writing to a resident key raises its frequency exactly like a read does.
//!
//! All buckets thread through one shared arena, so moving a key between
//! buckets never moves or reallocates its value.
//!
//! # Performance Characteristics
//!
//! - `get_response`, `set_response`: O(log F) where F is the number of distinct
//!   resident frequencies, O(1) amortized for typical workloads
//! - Space: O(n) for n resident keys
//!
//! # Thread Safety
//!
//! Not thread-safe; see [`SharedCache`](crate::concurrent::SharedCache).

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::entry::{CacheEntry, CacheItem};
use crate::error::InvariantError;
use crate::list::{self, Arena, List, SlotId};
use crate::meta::LfuMeta;
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
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

/// An implementation of a Least Frequently Used (LFU) cache.
///
/// Keys that are read (or rewritten) more often survive longer. Among keys
/// with the same frequency, the least recently touched is evicted first.
///
/// # Examples
///
/// ```
/// use response_cache::{CacheStorage, LfuCache};
///
/// let mut cache: LfuCache<i64, &str> = LfuCache::new(2);
///
/// cache.set_response(1, "apple");
/// cache.set_response(2, "banana");
///
/// // Raise the frequency of key 1
/// cache.get_response(&1);
/// cache.get_response(&1);
/// assert_eq!(cache.frequency(&1), Some(3));
///
/// // Key 2 has the lowest frequency and is evicted
/// cache.set_response(3, "cherry");
/// assert_eq!(cache.get_response(&2), None);
/// assert_eq!(cache.get_response(&1), Some(&"apple"));
/// ```
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    /// Configuration for the LFU cache
    config: LfuCacheConfig,

    /// Backing storage for every resident item, across all buckets
    arena: Arena<CacheItem<K, V>>,

    /// Frequency to bucket of items with that frequency, oldest at the front.
    /// Never holds an empty bucket.
    buckets: BTreeMap<u64, List>,

    /// Key to arena slot
    map: HashMap<K, SlotId, S>,

    /// Smallest frequency with a non-empty bucket; meaningless when empty
    min_frequency: u64,

    /// Metrics for tracking cache performance and frequency distribution
    metrics: LfuCacheMetrics,
}

impl<K: Hash + Eq, V> LfuCache<K, V> {
    /// Creates a new LFU cache holding at most `capacity` keys.
    pub fn new(capacity: usize) -> LfuCache<K, V, DefaultHashBuilder> {
        LfuCache::with_hasher(capacity, DefaultHashBuilder::default())
    }

    /// Creates a new LFU cache from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity of the cache
    /// * `hasher` - Optional hash builder; the default one is used if `None`
    pub fn init(config: LfuCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        LfuCache::with_hasher(config.capacity, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Creates a new LFU cache with the specified capacity and hash builder.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        debug!(capacity, "created LFU cache");
        let reserved = list::initial_capacity(capacity);
        LfuCache {
            config: LfuCacheConfig { capacity },
            arena: Arena::with_capacity(reserved),
            buckets: BTreeMap::new(),
            map: HashMap::with_capacity_and_hasher(reserved, hash_builder),
            min_frequency: 0,
            metrics: LfuCacheMetrics::new(capacity),
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

    /// Current frequency of `key`, or `None` if it is not resident.
    ///
    /// Does not count as an access.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let slot = self.map.get(key)?;
        self.arena.get(*slot).map(CacheItem::frequency)
    }

    /// Lowest frequency among resident keys, or `None` when empty.
    pub fn min_frequency(&self) -> Option<u64> {
        if self.is_empty() {
            None
        } else {
            Some(self.min_frequency)
        }
    }

    /// Moves the item in `slot` up one frequency bucket.
    fn bump(&mut self, slot: SlotId) {
        let Some(item) = self.arena.get_mut(slot) else {
            return;
        };
        let old_frequency = item.metadata.frequency;
        let new_frequency = item.metadata.increment();

        if let Some(bucket) = self.buckets.get_mut(&old_frequency) {
            bucket.unlink(&mut self.arena, slot);
            if bucket.is_empty() {
                self.buckets.remove(&old_frequency);
                if self.min_frequency == old_frequency {
                    self.min_frequency = new_frequency;
                }
            }
        }
        self.buckets
            .entry(new_frequency)
            .or_default()
            .push_back(&mut self.arena, slot);

        self.metrics.record_frequency_increment();
        self.metrics.update_frequency_levels(&self.buckets);
    }

    /// Evicts the oldest item of the lowest-frequency bucket.
    fn evict(&mut self) {
        let frequency = self.min_frequency;
        let Some(bucket) = self.buckets.get_mut(&frequency) else {
            return;
        };
        let Some(slot) = bucket.pop_front(&mut self.arena) else {
            return;
        };
        if bucket.is_empty() {
            self.buckets.remove(&frequency);
        }
        if let Some(item) = self.arena.remove(slot) {
            self.map.remove(&item.key);
            self.metrics.core.record_eviction();
            trace!(
                frequency,
                len = self.map.len(),
                capacity = self.capacity(),
                "evicted least frequently used entry"
            );
        }
    }

    /// Checks the index, arena, buckets and `min_frequency` against each other.
    ///
    /// Intended for tests and debugging; walks every item.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity() {
            return Err(InvariantError::new(format!(
                "{} resident keys exceed capacity {}",
                self.map.len(),
                self.capacity()
            )));
        }
        if self.map.len() != self.arena.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but arena holds {} items",
                self.map.len(),
                self.arena.len()
            )));
        }

        let mut linked = 0usize;
        for (&frequency, bucket) in &self.buckets {
            if bucket.is_empty() {
                return Err(InvariantError::new(format!(
                    "empty bucket left behind for frequency {frequency}"
                )));
            }
            bucket.validate(&self.arena)?;
            for (slot, item) in bucket.iter(&self.arena) {
                if item.frequency() != frequency {
                    return Err(InvariantError::new(format!(
                        "item with frequency {} sits in bucket {frequency}",
                        item.frequency()
                    )));
                }
                if self.map.get(&item.key) != Some(&slot) {
                    return Err(InvariantError::new("bucket node is not indexed by its key"));
                }
            }
            linked += bucket.len();
        }
        if linked != self.arena.len() {
            return Err(InvariantError::new(format!(
                "buckets link {linked} items but arena holds {}",
                self.arena.len()
            )));
        }

        match self.buckets.keys().next() {
            Some(&lowest) if lowest != self.min_frequency => Err(InvariantError::new(format!(
                "min_frequency is {} but lowest bucket is {lowest}",
                self.min_frequency
            ))),
            _ => Ok(()),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheStorage<K, V> for LfuCache<K, V, S> {
    fn set_response(&mut self, key: K, value: V) {
        if let Some(slot) = self.map.get(&key).copied() {
            if let Some(item) = self.arena.get_mut(slot) {
                item.value = value;
            }
            self.bump(slot);
            self.metrics.core.record_update();
            return;
        }

        if self.capacity() == 0 {
            self.metrics.core.record_rejection();
            trace!("zero-capacity LFU cache dropped insert");
            return;
        }

        if self.map.len() >= self.capacity() {
            self.evict();
        }

        let item = CacheEntry::with_metadata(key.clone(), value, LfuMeta::default());
        let slot = self.arena.insert(item);
        self.buckets
            .entry(1)
            .or_default()
            .push_back(&mut self.arena, slot);
        self.map.insert(key, slot);
        self.min_frequency = 1;

        self.metrics.core.record_insertion();
        self.metrics.update_frequency_levels(&self.buckets);
    }

    fn get_response(&mut self, key: &K) -> Option<&V> {
        let Some(slot) = self.map.get(key).copied() else {
            self.metrics.core.record_miss();
            return None;
        };
        self.bump(slot);
        self.metrics.core.record_hit();
        self.arena.get(slot).map(|item| &item.value)
    }
}

impl<K, V, S> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for LfuCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.arena.len())
            .field("min_frequency", &self.min_frequency)
            .field("frequency_levels", &self.buckets.len())
            .finish()
    }
}
