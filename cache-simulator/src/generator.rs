//! Synthetic trace generation
//!
//! Produces proxy traffic with a hot set of query indices that receives most
//! of the requests and a long tail that receives the rest. Within the hot set
//! popularity is skewed further with a Zipf-like weight, so low ranks are
//! requested far more often than high ones.

use crate::models::Request;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Zipf skewness applied inside the hot set
const ZIPF_S: f64 = 0.9;

/// Parameters for generating a synthetic trace
#[derive(Debug, Clone)]
pub struct TrafficConfig {
    /// Total number of requests to write
    pub requests: u64,
    /// Requests per second, used to space timestamps
    pub rps: u32,
    /// Number of distinct query indices
    pub unique_queries: u32,
    /// Percentage of traffic aimed at the hot set
    pub popular_traffic_percent: u8,
    /// Percentage of query indices that form the hot set
    pub popular_queries_percent: u8,
    /// Minimum response size in bytes
    pub min_size: usize,
    /// Maximum response size in bytes
    pub max_size: usize,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Output file
    pub output: PathBuf,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            requests: 100_000,
            rps: 100,
            unique_queries: 10_000,
            popular_traffic_percent: 80,
            popular_queries_percent: 20,
            min_size: 128,
            max_size: 4096,
            seed: None,
            output: PathBuf::from("trace.csv"),
        }
    }
}

/// Generator for synthetic request traces
#[derive(Debug)]
pub struct TrafficGenerator {
    config: TrafficConfig,
    rng: StdRng,
}

impl TrafficGenerator {
    pub fn new(config: TrafficConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    fn popular_queries(&self) -> u32 {
        let popular = (f64::from(self.config.unique_queries)
            * f64::from(self.config.popular_queries_percent.min(100))
            / 100.0) as u32;
        popular.clamp(1, self.config.unique_queries.max(1))
    }

    /// Draw a rank in `0..n` with weight roughly `1 / (rank + 1)^s`, by
    /// inverting the continuous Zipf CDF
    fn zipf_rank(&mut self, n: u32) -> u32 {
        let exponent = 1.0 - ZIPF_S;
        let upper = (f64::from(n) + 1.0).powf(exponent);
        let u: f64 = self.rng.gen();
        let x = (1.0 + u * (upper - 1.0)).powf(1.0 / exponent);
        ((x.floor() as u32).saturating_sub(1)).min(n - 1)
    }

    /// Draw the next request at the given timestamp
    pub fn next_request(&mut self, timestamp: u64) -> Request {
        let unique = self.config.unique_queries.max(1);
        let popular = self.popular_queries();
        let regular = unique - popular;
        let popular_probability = f64::from(self.config.popular_traffic_percent.min(100)) / 100.0;

        let query_index = if regular == 0 || self.rng.gen_bool(popular_probability) {
            self.zipf_rank(popular)
        } else {
            popular + self.rng.gen_range(0..regular)
        };

        let min_size = self.config.min_size.min(self.config.max_size);
        let response_size = self.rng.gen_range(min_size..=self.config.max_size);

        Request {
            timestamp,
            query_index: i64::from(query_index),
            response_size,
        }
    }

    /// Write the trace to `config.output`, returning the request count
    pub fn generate(&mut self) -> Result<u64, Box<dyn std::error::Error>> {
        if let Some(parent) = self.config.output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        println!("Generating trace with the following parameters:");
        println!("  Requests: {}", self.config.requests);
        println!("  Requests per second: {}", self.config.rps);
        println!("  Unique query indices: {}", self.config.unique_queries);
        println!(
            "  Traffic distribution: {}% to {} hot query indices",
            self.config.popular_traffic_percent,
            self.popular_queries()
        );
        println!(
            "  Response size range: {} - {} bytes",
            self.config.min_size, self.config.max_size
        );
        println!("  Output: {}", self.config.output.display());

        let file = BufWriter::new(File::create(&self.config.output)?);
        let mut writer = csv::Writer::from_writer(file);

        let start_time = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let rps = u64::from(self.config.rps.max(1));
        for i in 0..self.config.requests {
            let request = self.next_request(start_time + i / rps);
            writer.serialize(request)?;
        }

        writer.flush()?;
        println!("Trace generation complete");
        Ok(self.config.requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::LogReader;
    use std::collections::HashMap;

    fn temp_trace(test_name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("response_trace_generator_{test_name}"));
        let _ = fs::remove_dir_all(&dir);
        dir.join("trace.csv")
    }

    fn seeded(seed: u64) -> TrafficGenerator {
        TrafficGenerator::new(TrafficConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn test_default_config() {
        let config = TrafficConfig::default();
        assert_eq!(config.requests, 100_000);
        assert_eq!(config.unique_queries, 10_000);
        assert_eq!(config.popular_traffic_percent, 80);
        assert_eq!(config.popular_queries_percent, 20);
        assert!(config.min_size <= config.max_size);
    }

    #[test]
    fn test_same_seed_same_trace() {
        let mut a = seeded(7);
        let mut b = seeded(7);
        for ts in 0..1_000 {
            assert_eq!(a.next_request(ts), b.next_request(ts));
        }
    }

    #[test]
    fn test_requests_stay_in_range() {
        let mut generator = seeded(1);
        for ts in 0..10_000 {
            let request = generator.next_request(ts);
            assert!((0..10_000).contains(&request.query_index));
            assert!((128..=4096).contains(&request.response_size));
        }
    }

    #[test]
    fn test_hot_set_receives_most_traffic() {
        let mut generator = seeded(3);
        let total = 20_000;
        let mut hot = 0;
        let mut counts: HashMap<i64, u32> = HashMap::new();
        for ts in 0..total {
            let request = generator.next_request(ts);
            if request.query_index < 2_000 {
                hot += 1;
            }
            *counts.entry(request.query_index).or_default() += 1;
        }

        let share = f64::from(hot) / total as f64;
        assert!((0.75..0.85).contains(&share), "hot share was {share}");
        // Low ranks carry the largest Zipf weight
        let top = counts.get(&0).copied().unwrap_or(0);
        let mid = counts.get(&1_000).copied().unwrap_or(0);
        assert!(top > mid, "rank 0 seen {top} times, rank 1000 seen {mid}");
    }

    #[test]
    fn test_single_query_space() {
        let mut generator = TrafficGenerator::new(TrafficConfig {
            unique_queries: 1,
            seed: Some(9),
            ..Default::default()
        });
        for ts in 0..100 {
            assert_eq!(generator.next_request(ts).query_index, 0);
        }
    }

    #[test]
    fn test_generate_writes_readable_trace() {
        let output = temp_trace("readable");
        let mut generator = TrafficGenerator::new(TrafficConfig {
            requests: 500,
            rps: 50,
            seed: Some(11),
            output: output.clone(),
            ..Default::default()
        });

        assert_eq!(generator.generate().unwrap(), 500);

        let requests = LogReader::new([&output]).read_all().unwrap();
        assert_eq!(requests.len(), 500);
        let first = requests[0].timestamp;
        assert_eq!(requests[49].timestamp, first);
        assert_eq!(requests[50].timestamp, first + 1);
        assert!(requests.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        if let Some(dir) = output.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
