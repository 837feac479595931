//! The response-cache contract.
//!
//! [`CacheStorage`] is the only surface a response-caching layer needs:
//! store a response under a key, and look one up. Both [`LruCache`] and
//! [`LfuCache`] implement it, as does the policy-erasing
//! [`ResponseCache`], so call sites never branch on the eviction policy.
//!
//! A lookup counts as an access. It reorders the cache (LRU) or raises the
//! key's frequency (LFU), which is why `get_response` takes `&mut self`.
//!
//! ```
//! use response_cache::{CacheStorage, LfuCache, LruCache};
//!
//! fn warm<C: CacheStorage<i64, String>>(cache: &mut C) {
//!     cache.set_response(1, "first".to_string());
//!     cache.set_response(2, "second".to_string());
//! }
//!
//! let mut lru: LruCache<i64, String> = LruCache::new(2);
//! let mut lfu: LfuCache<i64, String> = LfuCache::new(2);
//! warm(&mut lru);
//! warm(&mut lfu);
//! assert_eq!(lru.get_response(&1).map(String::as_str), Some("first"));
//! assert_eq!(lfu.get_response(&3), None);
//! ```
//!
//! [`LruCache`]: crate::LruCache
//! [`LfuCache`]: crate::LfuCache
//! [`ResponseCache`]: crate::ResponseCache

/// Key/value storage with a bounded number of resident keys.
///
/// Neither operation can fail. A missing key is a normal cache miss and is
/// reported as `None`.
pub trait CacheStorage<K, V> {
    /// Inserts or replaces the response stored under `key`.
    ///
    /// Storing a new key into a full cache evicts one resident key first,
    /// chosen by the cache's policy. A cache with zero capacity drops the
    /// write.
    fn set_response(&mut self, key: K, value: V);

    /// Returns the response stored under `key`, recording the access.
    fn get_response(&mut self, key: &K) -> Option<&V>;
}

impl<K, V, C> CacheStorage<K, V> for &mut C
where
    C: CacheStorage<K, V> + ?Sized,
{
    #[inline]
    fn set_response(&mut self, key: K, value: V) {
        (**self).set_response(key, value)
    }

    #[inline]
    fn get_response(&mut self, key: &K) -> Option<&V> {
        (**self).get_response(key)
    }
}
