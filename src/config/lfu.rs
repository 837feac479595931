//! Configuration for the Least Frequently Used (LFU) cache.
//!
//! # Examples
//!
//! ```
//! use response_cache::config::LfuCacheConfig;
//! use response_cache::LfuCache;
//!
//! let config = LfuCacheConfig { capacity: 500 };
//! let cache: LfuCache<i64, String> = LfuCache::init(config, None);
//! assert_eq!(cache.capacity(), 500);
//! ```

use core::fmt;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// LFU tracks how often each key is touched and evicts the key with the
/// lowest count, breaking ties by evicting the one touched longest ago.
///
/// # Fields
///
/// - `capacity`: Maximum number of resident keys. `0` gives a cache that
///   never stores anything.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
