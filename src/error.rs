//! Error types.
//!
//! Cache operations themselves never fail: a miss is an ordinary `None` and an
//! insert always completes, evicting if it has to. Errors only come from two
//! places:
//!
//! - [`ConfigError`]: construction parameters that cannot describe a cache,
//!   such as a negative capacity or an unknown policy name.
//! - [`InvariantError`]: returned by `check_invariants` when the internal
//!   index, arena and ordering structures disagree.
//!
//! ```
//! use response_cache::config::{EvictionPolicy, ResponseCacheConfig};
//! use response_cache::error::ConfigError;
//!
//! let err = ResponseCacheConfig::try_new(EvictionPolicy::Lru, -1).unwrap_err();
//! assert_eq!(err, ConfigError::NegativeCapacity(-1));
//!
//! let err = "fifo".parse::<EvictionPolicy>().unwrap_err();
//! assert!(matches!(err, ConfigError::UnknownPolicy(_)));
//! ```

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A signed capacity below zero was supplied.
    NegativeCapacity(i64),
    /// The policy name is neither `lru` nor `lfu`.
    UnknownPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NegativeCapacity(n) => {
                write!(f, "capacity must be non-negative, got {n}")
            }
            ConfigError::UnknownPolicy(name) => {
                write!(f, "unknown eviction policy '{name}' (expected 'lru' or 'lfu')")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of the invariant that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvariantError {}
