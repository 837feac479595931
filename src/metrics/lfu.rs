//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends CoreCacheMetrics)
///
/// Adds frequency-distribution counters on top of the core metrics.
#[derive(Debug, Clone)]
pub struct LfuCacheMetrics {
    /// Core metrics common to both policies
    pub core: CoreCacheMetrics,

    /// Lowest frequency among resident items (0 when empty)
    pub min_frequency: u64,

    /// Highest frequency among resident items (0 when empty)
    pub max_frequency: u64,

    /// Total number of frequency bumps (reads plus writes to resident keys)
    pub total_frequency_increments: u64,

    /// Number of non-empty frequency buckets
    pub active_frequency_levels: u64,
}

impl LfuCacheMetrics {
    /// Creates metrics for an LFU cache of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            core: CoreCacheMetrics::new(capacity),
            min_frequency: 0,
            max_frequency: 0,
            total_frequency_increments: 0,
            active_frequency_levels: 0,
        }
    }

    /// Records one frequency bump.
    #[inline]
    pub fn record_frequency_increment(&mut self) {
        self.total_frequency_increments += 1;
    }

    /// Refreshes the bucket-derived gauges from the current frequency map.
    ///
    /// `frequency_buckets` must contain only non-empty buckets.
    pub fn update_frequency_levels<T>(&mut self, frequency_buckets: &BTreeMap<u64, T>) {
        self.active_frequency_levels = frequency_buckets.len() as u64;
        self.min_frequency = frequency_buckets.keys().next().copied().unwrap_or(0);
        self.max_frequency = frequency_buckets.keys().next_back().copied().unwrap_or(0);
    }

    /// Calculates the frequency range (max - min)
    pub fn frequency_range(&self) -> u64 {
        self.max_frequency.saturating_sub(self.min_frequency)
    }

    /// Converts LFU metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert("min_frequency".to_string(), self.min_frequency as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert("frequency_range".to_string(), self.frequency_range() as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels as f64,
        );

        if self.core.requests > 0 {
            metrics.insert(
                "frequency_increment_rate".to_string(),
                self.total_frequency_increments as f64 / self.core.requests as f64,
            );
        }

        metrics
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
