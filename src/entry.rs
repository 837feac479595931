//! Stored cache records.
//!
//! Both policies store a [`CacheEntry`]: the key, the cached response, and
//! whatever per-entry bookkeeping the policy needs in `metadata`. The LRU
//! cache needs none (its position in the recency list says everything), so
//! it uses `M = ()`. The LFU cache stores an [`LfuMeta`] frequency counter;
//! that combination is spelled [`CacheItem`].
//!
//! Entries are pure data. The owning cache holds each one in exactly one
//! arena slot and is the only thing that ever mutates it.
//!
//! ```
//! use response_cache::entry::{CacheEntry, CacheItem};
//! use response_cache::meta::LfuMeta;
//!
//! let entry: CacheEntry<i64, String> = CacheEntry::new(7, "cached body".to_string());
//! assert_eq!(entry.key, 7);
//!
//! let item: CacheItem<i64, String> =
//!     CacheEntry::with_metadata(7, "cached body".to_string(), LfuMeta::new(1));
//! assert_eq!(item.metadata.frequency, 1);
//! ```

use crate::meta::LfuMeta;

/// A key, its cached value, and algorithm-specific metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V, M = ()> {
    /// The cached key (a query index for the response layer).
    pub key: K,

    /// The cached response.
    pub value: V,

    /// Per-entry policy state. `()` for LRU.
    pub metadata: M,
}

/// An LFU record: key, value and access frequency.
pub type CacheItem<K, V> = CacheEntry<K, V, LfuMeta>;

impl<K, V> CacheEntry<K, V> {
    /// Creates an entry without metadata.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            metadata: (),
        }
    }
}

impl<K, V, M> CacheEntry<K, V, M> {
    /// Creates an entry carrying policy metadata.
    #[inline]
    pub fn with_metadata(key: K, value: V, metadata: M) -> Self {
        Self {
            key,
            value,
            metadata,
        }
    }

    /// Replaces the value, returning the previous one.
    #[inline]
    pub fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Splits the entry into its key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> CacheItem<K, V> {
    /// Current access frequency of this item.
    #[inline]
    pub fn frequency(&self) -> u64 {
        self.metadata.frequency
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::format;
    use alloc::string::{String, ToString};

    #[test]
    fn test_new_entry() {
        let entry: CacheEntry<i64, &str> = CacheEntry::new(1, "one");
        assert_eq!(entry.key, 1);
        assert_eq!(entry.value, "one");
        let () = entry.metadata;
    }

    #[test]
    fn test_item_frequency() {
        let mut item: CacheItem<i64, String> =
            CacheEntry::with_metadata(1, "one".to_string(), LfuMeta::new(1));
        assert_eq!(item.frequency(), 1);
        item.metadata.increment();
        assert_eq!(item.frequency(), 2);
    }

    #[test]
    fn test_replace_value() {
        let mut entry: CacheEntry<i64, String> = CacheEntry::new(1, "old".to_string());
        let old = entry.replace_value("new".to_string());
        assert_eq!(old, "old");
        assert_eq!(entry.into_parts(), (1, "new".to_string()));
    }

    #[test]
    fn test_debug_impl() {
        let entry: CacheEntry<i64, i32> = CacheEntry::new(5, 42);
        let debug_str = format!("{:?}", entry);
        assert!(debug_str.contains("CacheEntry"));
        assert!(debug_str.contains("42"));
    }
}
