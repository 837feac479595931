//! Cache Configuration Module
//!
//! Configuration structures for both cache policies, plus the policy selector
//! used by [`ResponseCache`](crate::ResponseCache).
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: Capacity is a `usize`, so a negative capacity cannot reach a cache
//! - **No boilerplate**: No builder needed; fallible constructors exist only for signed input
//!
//! # Capacity
//!
//! Capacity is the maximum number of resident keys and is fixed for the
//! lifetime of the cache. A capacity of `0` is valid for both policies and
//! yields a cache that stays empty: every insert of a new key is dropped.
//!
//! Callers holding a *signed* capacity (for example one read from a config
//! file or another language binding) go through
//! [`capacity_from_signed`] or [`ResponseCacheConfig::try_new`], which reject
//! negative values with [`ConfigError::NegativeCapacity`] instead of clamping.
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Least Recently Used |
//! | `LfuCacheConfig` | [`LfuCache`](crate::LfuCache) | Least Frequently Used |
//! | `ResponseCacheConfig` | [`ResponseCache`](crate::ResponseCache) | Policy chosen at construction |
//!
//! # Examples
//!
//! ```
//! use response_cache::config::{EvictionPolicy, ResponseCacheConfig};
//! use response_cache::ResponseCache;
//!
//! let config = ResponseCacheConfig::try_new(EvictionPolicy::Lfu, 1000).unwrap();
//! let cache: ResponseCache = ResponseCache::from_config(config);
//! assert_eq!(cache.capacity(), 1000);
//! ```

extern crate alloc;

use crate::error::ConfigError;
use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

pub mod lfu;
pub mod lru;

pub use lfu::LfuCacheConfig;
pub use lru::LruCacheConfig;

/// Converts a signed capacity into a cache capacity.
///
/// Negative values are rejected; zero is allowed. On targets where `usize` is
/// narrower than `i64`, values above `usize::MAX` saturate.
///
/// ```
/// use response_cache::config::capacity_from_signed;
///
/// assert_eq!(capacity_from_signed(3), Ok(3));
/// assert_eq!(capacity_from_signed(0), Ok(0));
/// assert!(capacity_from_signed(-1).is_err());
/// ```
pub fn capacity_from_signed(capacity: i64) -> Result<usize, ConfigError> {
    if capacity < 0 {
        return Err(ConfigError::NegativeCapacity(capacity));
    }
    Ok(usize::try_from(capacity).unwrap_or(usize::MAX))
}

/// Which eviction strategy a [`ResponseCache`](crate::ResponseCache) uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EvictionPolicy {
    /// Evict the least recently used key.
    Lru,
    /// Evict the least frequently used key, oldest first among ties.
    Lfu,
}

impl EvictionPolicy {
    /// Short upper-case name, matching the metrics `algorithm_name`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "LRU",
            EvictionPolicy::Lfu => "LFU",
        }
    }

    /// Both policies, in a stable order.
    pub fn all() -> [EvictionPolicy; 2] {
        [EvictionPolicy::Lru, EvictionPolicy::Lfu]
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("lru") {
            Ok(EvictionPolicy::Lru)
        } else if name.eq_ignore_ascii_case("lfu") {
            Ok(EvictionPolicy::Lfu)
        } else {
            Err(ConfigError::UnknownPolicy(name.to_string()))
        }
    }
}

/// Configuration for a [`ResponseCache`](crate::ResponseCache).
///
/// # Fields
///
/// - `policy`: which eviction strategy backs the cache
/// - `capacity`: maximum number of resident keys; `0` means always empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseCacheConfig {
    /// Eviction strategy.
    pub policy: EvictionPolicy,
    /// Maximum number of resident keys.
    pub capacity: usize,
}

impl ResponseCacheConfig {
    /// Builds a config from a signed capacity, rejecting negative values.
    pub fn try_new(policy: EvictionPolicy, capacity: i64) -> Result<Self, ConfigError> {
        Ok(Self {
            policy,
            capacity: capacity_from_signed(capacity)?,
        })
    }
}

impl From<LruCacheConfig> for ResponseCacheConfig {
    fn from(config: LruCacheConfig) -> Self {
        Self {
            policy: EvictionPolicy::Lru,
            capacity: config.capacity,
        }
    }
}

impl From<LfuCacheConfig> for ResponseCacheConfig {
    fn from(config: LfuCacheConfig) -> Self {
        Self {
            policy: EvictionPolicy::Lfu,
            capacity: config.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse_is_case_insensitive() {
        assert_eq!("lru".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Lru));
        assert_eq!("LFU".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Lfu));
        assert_eq!(" Lfu ".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Lfu));
        assert_eq!(
            "slru".parse::<EvictionPolicy>(),
            Err(ConfigError::UnknownPolicy("slru".to_string()))
        );
    }

    #[test]
    fn test_policy_display_round_trips() {
        for policy in EvictionPolicy::all() {
            assert_eq!(policy.to_string().parse::<EvictionPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_negative_capacity_is_rejected() {
        assert_eq!(
            ResponseCacheConfig::try_new(EvictionPolicy::Lru, -5),
            Err(ConfigError::NegativeCapacity(-5))
        );
        assert_eq!(
            capacity_from_signed(i64::MIN),
            Err(ConfigError::NegativeCapacity(i64::MIN))
        );
    }

    #[test]
    fn test_zero_capacity_is_accepted() {
        let config = ResponseCacheConfig::try_new(EvictionPolicy::Lfu, 0).unwrap();
        assert_eq!(config.capacity, 0);
        assert_eq!(config.policy, EvictionPolicy::Lfu);
    }

    #[test]
    fn test_from_policy_configs() {
        let config: ResponseCacheConfig = LruCacheConfig { capacity: 4 }.into();
        assert_eq!(config.policy, EvictionPolicy::Lru);
        let config: ResponseCacheConfig = LfuCacheConfig { capacity: 8 }.into();
        assert_eq!(config.policy, EvictionPolicy::Lfu);
        assert_eq!(config.capacity, 8);
    }
}
