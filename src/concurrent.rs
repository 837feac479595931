//! Thread-safe cache handle.
//!
//! The caches in this crate do no locking of their own. [`SharedCache`] puts
//! one behind a single `parking_lot::Mutex` so it can be shared across
//! threads (typically inside an `Arc`).
//!
//! ## Why Mutex Instead of RwLock?
//!
//! Both policies need **mutable access even for reads**. Every
//! `get_response` updates internal state:
//!
//! - **LRU**: Moves the accessed entry to the back of the recency list
//! - **LFU**: Increments the frequency counter and moves the item between
//!   frequency buckets
//!
//! An `RwLock` would hand out write locks for every call anyway, so a
//! `Mutex` is used.
//!
//! ## Why one lock?
//!
//! Hash-partitioning the key space over several locks would make each
//! partition evict on its own, so the evicted key would only be the least
//! recently (or frequently) used key *of its partition*. A single lock keeps
//! eviction global.
//!
//! # Example
//!
//! ```rust
//! use response_cache::concurrent::SharedResponseCache;
//! use response_cache::config::EvictionPolicy;
//! use response_cache::ResponseCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(SharedResponseCache::new(ResponseCache::new(EvictionPolicy::Lru, 1000)));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 let key = t * 1000 + i;
//!                 cache.set_response(key, format!("response {key}"));
//!                 assert!(cache.get_response(&key).is_some());
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.lock().len(), 400);
//! ```
//!
//! # Zero-Copy Access
//!
//! `get_response` clones the value out so the lock is released before the
//! caller uses it. Use `get_with` to work on the value while the lock is held
//! instead:
//!
//! ```rust
//! use response_cache::concurrent::SharedCache;
//! use response_cache::LfuCache;
//!
//! let cache = SharedCache::new(LfuCache::<i64, String>::new(8));
//! cache.set_response(1, "a rather long response body".to_string());
//! let len = cache.get_with(&1, |body: &String| body.len());
//! assert_eq!(len, Some(27));
//! ```

extern crate alloc;

use crate::metrics::CacheMetrics;
use crate::response::ResponseCache;
use crate::storage::CacheStorage;
use crate::QueryIndex;
use alloc::collections::BTreeMap;
use alloc::string::String;
use parking_lot::{Mutex, MutexGuard};

/// A cache guarded by one mutex.
#[derive(Debug, Default)]
pub struct SharedCache<C> {
    inner: Mutex<C>,
}

/// The shared form of the default [`ResponseCache`].
pub type SharedResponseCache<K = QueryIndex, V = String> = SharedCache<ResponseCache<K, V>>;

impl<C> SharedCache<C> {
    /// Wraps `cache` for shared use.
    pub fn new(cache: C) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// Locks the cache for a sequence of operations that must not interleave
    /// with other threads.
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, C> {
        self.inner.lock()
    }

    /// Unwraps the cache.
    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }

    /// Inserts or replaces the response stored under `key`.
    pub fn set_response<K, V>(&self, key: K, value: V)
    where
        C: CacheStorage<K, V>,
    {
        self.inner.lock().set_response(key, value);
    }

    /// Looks up `key`, recording the access, and returns a clone of the value.
    pub fn get_response<K, V>(&self, key: &K) -> Option<V>
    where
        C: CacheStorage<K, V>,
        V: Clone,
    {
        self.inner.lock().get_response(key).cloned()
    }

    /// Looks up `key`, recording the access, and applies `f` to the value
    /// while the lock is held.
    pub fn get_with<K, V, R, F>(&self, key: &K, f: F) -> Option<R>
    where
        C: CacheStorage<K, V>,
        F: FnOnce(&V) -> R,
    {
        let mut guard = self.inner.lock();
        guard.get_response(key).map(f)
    }
}

impl<C> From<C> for SharedCache<C> {
    fn from(cache: C) -> Self {
        SharedCache::new(cache)
    }
}

impl<C: CacheMetrics> CacheMetrics for SharedCache<C> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.inner.lock().algorithm_name()
    }
}
