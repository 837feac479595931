#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Choosing a Policy
//!
//! | Policy | Type | Evicts | Best Use Case |
//! |--------|------|--------|---------------|
//! | LRU | [`LruCache`] | least recently read or written key | recency-driven traffic, bursts of repeated queries |
//! | LFU | [`LfuCache`] | least frequently touched key, oldest first among ties | stable popularity, a hot set of queries |
//!
//! Both implement [`CacheStorage`]. [`ResponseCache`] picks one at
//! construction so call sites stay policy-agnostic.
//!
//! ## Performance Characteristics
//!
//! | Policy | `get_response` | `set_response` | Ordering structure |
//! |--------|----------------|----------------|--------------------|
//! | LRU    | O(1)           | O(1)           | one arena-backed recency list |
//! | LFU    | O(log F)       | O(log F)       | one arena-backed list per frequency, F distinct frequencies |
//!
//! ## Code Examples
//!
//! ### LRU
//!
//! ```rust
//! use response_cache::config::LruCacheConfig;
//! use response_cache::{CacheStorage, LruCache};
//!
//! let mut cache: LruCache<i64, String> = LruCache::init(LruCacheConfig { capacity: 2 }, None);
//! cache.set_response(1, "a".to_string());
//! cache.set_response(2, "b".to_string());
//! cache.get_response(&1);                  // 1 becomes most recently used
//! cache.set_response(3, "c".to_string());  // 2 evicted
//! assert!(cache.get_response(&2).is_none());
//! ```
//!
//! ### LFU
//!
//! ```rust
//! use response_cache::config::LfuCacheConfig;
//! use response_cache::{CacheStorage, LfuCache};
//!
//! let mut cache: LfuCache<i64, String> = LfuCache::init(LfuCacheConfig { capacity: 2 }, None);
//! cache.set_response(1, "rare".to_string());
//! cache.set_response(2, "popular".to_string());
//!
//! for _ in 0..10 {
//!     cache.get_response(&2);
//! }
//!
//! cache.set_response(3, "new".to_string()); // 1 evicted (lowest frequency)
//! assert!(cache.get_response(&2).is_some());
//! assert!(cache.get_response(&1).is_none());
//! ```
//!
//! ### Policy chosen at runtime
//!
//! ```rust
//! use response_cache::config::EvictionPolicy;
//! use response_cache::{CacheStorage, ResponseCache};
//!
//! let policy: EvictionPolicy = "lfu".parse().unwrap();
//! let mut cache: ResponseCache = ResponseCache::new(policy, 100);
//! cache.set_response(42, "cached".to_string());
//! assert_eq!(cache.get_response(&42).map(String::as_str), Some("cached"));
//! ```
//!
//! ## Concurrent Access
//!
//! Enable the `concurrent` feature for a mutex-guarded handle:
//!
//! ```toml
//! [dependencies]
//! response-cache = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! ```rust,ignore
//! use response_cache::concurrent::SharedResponseCache;
//! use response_cache::config::EvictionPolicy;
//! use response_cache::ResponseCache;
//! use std::sync::Arc;
//!
//! let cache = Arc::new(SharedResponseCache::new(ResponseCache::new(EvictionPolicy::Lru, 10_000)));
//!
//! let cache_clone = Arc::clone(&cache);
//! std::thread::spawn(move || {
//!     cache_clone.set_response(7, "body".to_string());
//! });
//! ```
//!
//! ## Modules
//!
//! - [`storage`]: The `CacheStorage` contract
//! - [`lru`]: Least Recently Used cache implementation
//! - [`lfu`]: Least Frequently Used cache implementation
//! - [`response`]: Policy-selected `ResponseCache`
//! - [`config`]: Configuration structures and policy selection
//! - [`metrics`]: Metrics collection for cache performance monitoring
//! - [`error`]: Configuration and invariant errors
//! - `concurrent`: Mutex-guarded shared cache (requires `concurrent` feature)

#![no_std]

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Key type used by the response layer: an integer fingerprint of a request.
pub type QueryIndex = i64;

/// Stored cache records.
///
/// Provides a generic `CacheEntry<K, V, M>` structure that holds key, value
/// and algorithm-specific metadata.
pub mod entry;

/// Algorithm-specific metadata types.
///
/// - `LfuMeta`: Frequency counter for LFU
pub mod meta;

/// Arena-backed doubly linked lists.
///
/// Internal infrastructure shared by both caches.
pub(crate) mod list;

/// Configuration and policy-selection errors, plus the invariant-check error.
pub mod error;

/// Cache configuration structures.
///
/// Provides configuration structures for both cache policies.
pub mod config;

/// The key/value contract both caches implement.
pub mod storage;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used key when
/// the capacity is reached.
pub mod lru;

/// Least Frequently Used (LFU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least frequently used key
/// when capacity is reached. Keys are tracked by their access frequency.
pub mod lfu;

/// Response cache with its eviction policy chosen at construction.
pub mod response;

/// Cache metrics system.
///
/// Provides a metrics collection and reporting system for both policies.
/// Each policy can track its own metrics while implementing a common interface.
pub mod metrics;

/// Thread-safe cache handle.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

// Re-export cache types
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use response::ResponseCache;
pub use storage::CacheStorage;

// Re-export entry types
pub use entry::{CacheEntry, CacheItem};

// Re-export metadata types
pub use meta::LfuMeta;

pub use error::{ConfigError, InvariantError};

#[cfg(feature = "concurrent")]
pub use concurrent::{SharedCache, SharedResponseCache};
