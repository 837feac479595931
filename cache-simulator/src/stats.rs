// Statistics reporting for cache simulation

use crate::models::{CacheMode, CsvResultRow, SimulationKey, SimulationResult};
use response_cache::config::EvictionPolicy;
use std::path::Path;

/// Formats and exports the results of a simulation run
#[derive(Debug)]
pub struct SimulationStats<'a> {
    result: &'a SimulationResult,
}

impl<'a> SimulationStats<'a> {
    pub fn new(result: &'a SimulationResult) -> Self {
        Self { result }
    }

    /// One CSV row per simulated cache, ordered by policy then mode
    pub fn rows(&self) -> Vec<CsvResultRow> {
        self.result
            .stats
            .iter()
            .map(|(key, stats)| CsvResultRow {
                policy: key.policy.as_str().to_string(),
                mode: key.mode.as_str().to_string(),
                capacity: self.result.capacity,
                hits: stats.hits,
                misses: stats.misses,
                hit_rate: stats.hit_rate(),
                byte_hit_rate: stats.byte_hit_rate(),
                bytes_hit: stats.bytes_hit,
                bytes_miss: stats.bytes_miss,
                evictions: stats.evictions,
                final_len: stats.final_len,
                simulation_time_ms: stats.simulation_time_ms,
            })
            .collect()
    }

    /// Print a summary report of the simulation results
    pub fn print_summary(&self) {
        println!("\nResponse Cache Simulation Summary");
        println!("=================================");
        println!("Total requests: {}", self.result.total_requests);
        println!("Unique query indices: {}", self.result.unique_queries);
        println!("Capacity: {}", self.result.capacity);
        println!("Wall time: {:.3}s", self.result.duration.as_secs_f64());

        println!(
            "\n{:<6} {:<6} {:>12} {:>12} {:>9} {:>10} {:>12} {:>10}",
            "Policy", "Mode", "Hits", "Misses", "HitRate", "ByteHit%", "Evictions", "Time"
        );
        println!("{}", "-".repeat(84));

        for (key, stats) in &self.result.stats {
            println!(
                "{:<6} {:<6} {:>12} {:>12} {:>8.2}% {:>9.2}% {:>12} {:>8}ms",
                key.policy.as_str(),
                key.mode.as_str(),
                stats.hits,
                stats.misses,
                stats.hit_rate(),
                stats.byte_hit_rate(),
                stats.evictions,
                stats.simulation_time_ms
            );
        }
    }

    /// Print sequential vs concurrent hit rates for each policy run in both modes
    pub fn print_comparison(&self) {
        println!("\nHit-Rate Comparison: Sequential vs Concurrent");
        println!(
            "{:<6} {:>11} {:>11} {:>9}",
            "Policy", "Sequential", "Concurrent", "Delta"
        );

        for policy in EvictionPolicy::all() {
            let seq = self
                .result
                .stats
                .get(&SimulationKey::new(policy, CacheMode::Sequential));
            let conc = self
                .result
                .stats
                .get(&SimulationKey::new(policy, CacheMode::Concurrent));

            if let (Some(seq), Some(conc)) = (seq, conc) {
                let delta = conc.hit_rate() - seq.hit_rate();
                println!(
                    "{:<6} {:>10.2}% {:>10.2}% {:>+8.2}%",
                    policy.as_str(),
                    seq.hit_rate(),
                    conc.hit_rate(),
                    delta
                );
            }
        }
    }

    /// Export results to a CSV file
    pub fn export_csv(&self, path: &Path) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in self.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PolicyStats;
    use std::collections::BTreeMap;
    use std::fs;
    use std::time::Duration;

    fn result() -> SimulationResult {
        let mut stats = BTreeMap::new();
        stats.insert(
            SimulationKey::new(EvictionPolicy::Lfu, CacheMode::Sequential),
            PolicyStats {
                hits: 9,
                misses: 1,
                bytes_hit: 90,
                bytes_miss: 10,
                evictions: 0,
                final_len: 1,
                simulation_time_ms: 2,
            },
        );
        stats.insert(
            SimulationKey::new(EvictionPolicy::Lru, CacheMode::Sequential),
            PolicyStats {
                hits: 5,
                misses: 5,
                bytes_hit: 50,
                bytes_miss: 50,
                evictions: 4,
                final_len: 1,
                simulation_time_ms: 1,
            },
        );
        SimulationResult {
            stats,
            total_requests: 10,
            unique_queries: 5,
            duration: Duration::from_millis(3),
            capacity: 1,
        }
    }

    #[test]
    fn test_rows_follow_key_order() {
        let result = result();
        let rows = SimulationStats::new(&result).rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].policy, "LRU");
        assert_eq!(rows[0].hit_rate, 50.0);
        assert_eq!(rows[1].policy, "LFU");
        assert_eq!(rows[1].hit_rate, 90.0);
        assert_eq!(rows[1].mode, "seq");
    }

    #[test]
    fn test_export_csv() {
        let dir = std::env::temp_dir().join("response_trace_stats_export");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("results.csv");

        let result = result();
        SimulationStats::new(&result).export_csv(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some(
                "policy,mode,capacity,hits,misses,hit_rate,byte_hit_rate,bytes_hit,\
                 bytes_miss,evictions,final_len,simulation_time_ms"
            )
        );
        assert!(lines.next().unwrap().starts_with("LRU,seq,1,5,5,50"));
        assert!(lines.next().unwrap().starts_with("LFU,seq,1,9,1,90"));
        assert_eq!(lines.next(), None);

        let _ = fs::remove_dir_all(&dir);
    }
}
