//! Algorithm-specific metadata types.
//!
//! | Algorithm | Metadata Type | Description |
//! |-----------|---------------|-------------|
//! | LRU       | `()` (none)   | Position in the recency list is implicit |
//! | LFU       | `LfuMeta`     | Access frequency counter |
//!
//! ```
//! use response_cache::meta::LfuMeta;
//!
//! let mut meta = LfuMeta::new(1);
//! assert_eq!(meta.increment(), 2);
//! ```

/// Metadata for LFU cache items.
///
/// New items start at frequency 1. The counter is bumped by exactly one on
/// every read of the key and on every write to an already-resident key, and
/// is never decremented while the key stays resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LfuMeta {
    /// Access frequency count, always `>= 1` for a resident item.
    pub frequency: u64,
}

impl LfuMeta {
    /// Creates LFU metadata with the given frequency.
    #[inline]
    pub fn new(frequency: u64) -> Self {
        Self { frequency }
    }

    /// Increments the frequency counter and returns the new value.
    #[inline]
    pub fn increment(&mut self) -> u64 {
        self.frequency += 1;
        self.frequency
    }
}

impl Default for LfuMeta {
    fn default() -> Self {
        Self { frequency: 1 }
    }
}
