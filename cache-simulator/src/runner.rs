//! Simulation runner for response caches
//!
//! Replays a trace through every configured policy the way the proxy uses
//! the cache: look the query index up with `get_response`, and on a miss
//! store a synthetic response of the logged size with `set_response`.
//!
//! Sequential caches are all fed from one streaming pass over the trace.
//! Concurrent caches share a `SharedCache` between worker threads; requests
//! are read in batches and each batch is split round-robin across workers,
//! so the relative order seen by the cache is only approximately the trace
//! order.

use std::collections::{BTreeMap, HashSet};
use std::thread;
use std::time::{Duration, Instant};

use response_cache::concurrent::SharedResponseCache;
use response_cache::config::EvictionPolicy;
use response_cache::metrics::CacheMetrics;
use response_cache::{CacheStorage, QueryIndex, ResponseCache, SharedCache};

use crate::input::{LogParseError, LogReader};
use crate::models::{
    CacheMode, PolicyStats, SimulationConfig, SimulationKey, SimulationResult, Request,
};

/// Requests buffered per batch in concurrent mode
const BATCH_SIZE: usize = 16_384;

/// Builds the body stored on a miss
fn synthetic_response(size: usize) -> String {
    "x".repeat(size)
}

/// One read-through step. Returns `true` on a hit.
pub fn replay<C>(cache: &mut C, request: &Request) -> bool
where
    C: CacheStorage<QueryIndex, String>,
{
    if cache.get_response(&request.query_index).is_some() {
        return true;
    }
    cache.set_response(
        request.query_index,
        synthetic_response(request.response_size),
    );
    false
}

/// Read-through step against a shared cache. The lookup and the fill take
/// the lock separately, like two proxy workers racing on the same miss.
fn replay_shared(cache: &SharedResponseCache, request: &Request) -> bool {
    if cache.get_with(&request.query_index, |_: &String| ()).is_some() {
        return true;
    }
    cache.set_response(
        request.query_index,
        synthetic_response(request.response_size),
    );
    false
}

/// Copies the cache's own counters into the simulator's stats
fn fill_from_metrics<M: CacheMetrics>(stats: &mut PolicyStats, metrics: &M) {
    let metrics = metrics.metrics();
    let counter = |name: &str| metrics.get(name).copied().unwrap_or(0.0) as u64;
    stats.hits = counter("cache_hits");
    stats.misses = counter("cache_misses");
    stats.evictions = counter("evictions");
}

/// Runs simulations described by a [`SimulationConfig`]
#[derive(Debug)]
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Replay the trace through every policy and mode
    pub fn run(&self) -> Result<SimulationResult, LogParseError> {
        let reader = LogReader::new(&self.config.inputs);
        let files = reader.get_log_files()?;
        println!("Found {} trace file(s)", files.len());

        let start = Instant::now();
        let mut stats = BTreeMap::new();
        let mut totals = None;

        if self.config.modes.contains(&CacheMode::Sequential) {
            let (sequential, requests, unique) = self.run_sequential(&reader)?;
            stats.extend(sequential);
            totals = Some((requests, unique));
        }

        if self.config.modes.contains(&CacheMode::Concurrent) {
            for &policy in &self.config.policies {
                let (policy_stats, requests, unique) = self.run_concurrent(&reader, policy)?;
                stats.insert(SimulationKey::new(policy, CacheMode::Concurrent), policy_stats);
                totals.get_or_insert((requests, unique));
            }
        }

        let (total_requests, unique_queries) = totals.unwrap_or((0, 0));
        Ok(SimulationResult {
            stats,
            total_requests,
            unique_queries,
            duration: start.elapsed(),
            capacity: self.config.capacity,
        })
    }

    /// One pass over the trace feeding a private cache per policy
    #[allow(clippy::type_complexity)]
    fn run_sequential(
        &self,
        reader: &LogReader,
    ) -> Result<(BTreeMap<SimulationKey, PolicyStats>, usize, usize), LogParseError> {
        let mut caches: Vec<(EvictionPolicy, ResponseCache, PolicyStats, Duration)> = self
            .config
            .policies
            .iter()
            .map(|&policy| {
                (
                    policy,
                    ResponseCache::new(policy, self.config.capacity),
                    PolicyStats::new(),
                    Duration::ZERO,
                )
            })
            .collect();

        let mut total_requests = 0usize;
        let mut unique = HashSet::new();

        for request in reader.stream_requests()? {
            let request = request?;
            total_requests += 1;
            unique.insert(request.query_index);

            for (_, cache, stats, elapsed) in caches.iter_mut() {
                let op_start = Instant::now();
                let hit = replay(cache, &request);
                *elapsed += op_start.elapsed();
                if hit {
                    stats.bytes_hit += request.response_size as u64;
                } else {
                    stats.bytes_miss += request.response_size as u64;
                }
            }

            if total_requests % 1_000_000 == 0 {
                println!("Processed {total_requests} requests");
            }
        }

        let stats = caches
            .into_iter()
            .map(|(policy, cache, mut stats, elapsed)| {
                fill_from_metrics(&mut stats, &cache);
                stats.final_len = cache.len();
                stats.simulation_time_ms = elapsed.as_millis() as u64;
                (SimulationKey::new(policy, CacheMode::Sequential), stats)
            })
            .collect();

        Ok((stats, total_requests, unique.len()))
    }

    /// Replays the trace with `threads` workers sharing one cache
    fn run_concurrent(
        &self,
        reader: &LogReader,
        policy: EvictionPolicy,
    ) -> Result<(PolicyStats, usize, usize), LogParseError> {
        let cache: SharedResponseCache =
            SharedCache::new(ResponseCache::new(policy, self.config.capacity));
        let threads = self.config.threads.max(1);

        let mut stats = PolicyStats::new();
        let mut total_requests = 0usize;
        let mut unique = HashSet::new();
        let mut elapsed = Duration::ZERO;
        let mut batch = Vec::with_capacity(BATCH_SIZE);
        let mut requests = reader.stream_requests()?;

        loop {
            batch.clear();
            for request in requests.by_ref().take(BATCH_SIZE) {
                batch.push(request?);
            }
            if batch.is_empty() {
                break;
            }
            total_requests += batch.len();
            unique.extend(batch.iter().map(|r| r.query_index));

            let batch_start = Instant::now();
            let byte_counts: Vec<(u64, u64)> = thread::scope(|scope| {
                let handles: Vec<_> = (0..threads)
                    .map(|worker| {
                        let cache = &cache;
                        let batch = &batch;
                        scope.spawn(move || {
                            let (mut bytes_hit, mut bytes_miss) = (0u64, 0u64);
                            for request in batch.iter().skip(worker).step_by(threads) {
                                if replay_shared(cache, request) {
                                    bytes_hit += request.response_size as u64;
                                } else {
                                    bytes_miss += request.response_size as u64;
                                }
                            }
                            (bytes_hit, bytes_miss)
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                    .collect()
            });
            elapsed += batch_start.elapsed();

            for (bytes_hit, bytes_miss) in byte_counts {
                stats.bytes_hit += bytes_hit;
                stats.bytes_miss += bytes_miss;
            }
        }

        fill_from_metrics(&mut stats, &cache);
        stats.final_len = cache.lock().len();
        stats.simulation_time_ms = elapsed.as_millis() as u64;
        Ok((stats, total_requests, unique.len()))
    }
}
