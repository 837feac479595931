//! Data models for the response cache simulator

use response_cache::config::EvictionPolicy;
use response_cache::QueryIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// A single query seen by the proxy, as recorded in a trace file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Unix timestamp (seconds) of the request
    pub timestamp: u64,
    /// Query index the response is cached under
    pub query_index: QueryIndex,
    /// Size in bytes of the upstream response
    pub response_size: usize,
}

/// How the caches under test are driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheMode {
    /// One thread owns the cache outright
    Sequential,
    /// Worker threads share one `SharedCache`
    Concurrent,
}

impl CacheMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheMode::Sequential => "seq",
            CacheMode::Concurrent => "conc",
        }
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for `--mode`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModeError(pub String);

impl fmt::Display for UnknownModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown mode '{}' (expected sequential, concurrent or both)",
            self.0
        )
    }
}

impl std::error::Error for UnknownModeError {}

/// Parses the `--mode` flag into the list of modes to run
pub fn parse_modes(mode: &str) -> Result<Vec<CacheMode>, UnknownModeError> {
    match mode.trim().to_ascii_lowercase().as_str() {
        "sequential" | "seq" => Ok(vec![CacheMode::Sequential]),
        "concurrent" | "conc" => Ok(vec![CacheMode::Concurrent]),
        "both" => Ok(vec![CacheMode::Sequential, CacheMode::Concurrent]),
        _ => Err(UnknownModeError(mode.to_string())),
    }
}

/// Parses `--policies` values; `None` selects every policy
pub fn parse_policies(
    names: Option<&[String]>,
) -> Result<Vec<EvictionPolicy>, response_cache::ConfigError> {
    let Some(names) = names else {
        return Ok(EvictionPolicy::all().to_vec());
    };
    let mut policies = names
        .iter()
        .map(|name| EvictionPolicy::from_str(name))
        .collect::<Result<Vec<_>, _>>()?;
    policies.sort();
    policies.dedup();
    Ok(policies)
}

/// Identifies one simulated cache: a policy driven in a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimulationKey {
    pub policy: EvictionPolicy,
    pub mode: CacheMode,
}

impl SimulationKey {
    pub fn new(policy: EvictionPolicy, mode: CacheMode) -> Self {
        Self { policy, mode }
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Trace files, or directories containing trace files
    pub inputs: Vec<PathBuf>,
    /// Cache capacity (number of resident query indices)
    pub capacity: usize,
    /// Policies to simulate
    pub policies: Vec<EvictionPolicy>,
    /// Modes to simulate
    pub modes: Vec<CacheMode>,
    /// Worker threads for concurrent mode
    pub threads: usize,
}

/// Results of a simulation run
#[derive(Debug)]
pub struct SimulationResult {
    /// Statistics for each policy+mode combination
    pub stats: BTreeMap<SimulationKey, PolicyStats>,
    /// Total number of requests replayed
    pub total_requests: usize,
    /// Number of distinct query indices in the trace
    pub unique_queries: usize,
    /// Wall-clock duration of the whole run
    pub duration: Duration,
    /// Cache capacity used
    pub capacity: usize,
}

/// Statistics for a single simulated cache
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PolicyStats {
    /// Requests answered from the cache
    pub hits: u64,
    /// Requests that went upstream
    pub misses: u64,
    /// Response bytes served from the cache
    pub bytes_hit: u64,
    /// Response bytes fetched upstream
    pub bytes_miss: u64,
    /// Entries removed to make room
    pub evictions: u64,
    /// Resident entries when the trace ended
    pub final_len: usize,
    /// Time spent in cache operations, in milliseconds
    pub simulation_time_ms: u64,
}

impl PolicyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Byte hit rate as a percentage
    pub fn byte_hit_rate(&self) -> f64 {
        let total = self.bytes_hit + self.bytes_miss;
        if total > 0 {
            (self.bytes_hit as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// CSV export row for simulation results
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub policy: String,
    pub mode: String,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub byte_hit_rate: f64,
    pub bytes_hit: u64,
    pub bytes_miss: u64,
    pub evictions: u64,
    pub final_len: usize,
    pub simulation_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!(parse_modes("both").unwrap().len(), 2);
        assert_eq!(parse_modes("Sequential").unwrap(), vec![CacheMode::Sequential]);
        assert_eq!(parse_modes("conc").unwrap(), vec![CacheMode::Concurrent]);
        assert!(parse_modes("sharded").is_err());
    }

    #[test]
    fn test_parse_policies() {
        assert_eq!(parse_policies(None).unwrap(), EvictionPolicy::all().to_vec());

        let names = vec!["lfu".to_string(), "LRU".to_string(), "lfu".to_string()];
        assert_eq!(
            parse_policies(Some(&names)).unwrap(),
            vec![EvictionPolicy::Lru, EvictionPolicy::Lfu]
        );

        let names = vec!["arc".to_string()];
        assert!(parse_policies(Some(&names)).is_err());
    }

    #[test]
    fn test_policy_stats_rates() {
        let stats = PolicyStats {
            hits: 3,
            misses: 1,
            bytes_hit: 100,
            bytes_miss: 300,
            ..PolicyStats::new()
        };
        assert_eq!(stats.hit_rate(), 75.0);
        assert_eq!(stats.byte_hit_rate(), 25.0);
        assert_eq!(PolicyStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_simulation_keys_sort_by_policy_then_mode() {
        let mut keys = vec![
            SimulationKey::new(EvictionPolicy::Lfu, CacheMode::Sequential),
            SimulationKey::new(EvictionPolicy::Lru, CacheMode::Concurrent),
            SimulationKey::new(EvictionPolicy::Lru, CacheMode::Sequential),
        ];
        keys.sort();
        assert_eq!(keys[0].policy, EvictionPolicy::Lru);
        assert_eq!(keys[0].mode, CacheMode::Sequential);
        assert_eq!(keys[2].policy, EvictionPolicy::Lfu);
    }
}
