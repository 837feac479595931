//! Shared Cache Tests
//!
//! These tests validate that a `SharedCache` keeps the single-threaded
//! eviction semantics while being accessed from multiple threads.
//!
//! ## Test Strategy
//!
//! - Worker threads come from a `scoped_threadpool::Pool`, so they borrow the
//!   cache directly instead of going through an `Arc`
//! - Every test ends by checking the inner cache's invariants
//! - Policy laws that depend on ordering are checked from one thread after
//!   the concurrent phase, when the order is deterministic again

#![cfg(feature = "concurrent")]

use response_cache::concurrent::{SharedCache, SharedResponseCache};
use response_cache::config::EvictionPolicy;
use response_cache::metrics::CacheMetrics;
use response_cache::{LfuCache, LruCache, ResponseCache};
use scoped_threadpool::Pool;
use std::sync::atomic::{AtomicU64, Ordering};

const THREADS: u32 = 8;
const OPS_PER_THREAD: i64 = 2_000;

#[test]
fn test_shared_cache_stays_bounded() {
    for policy in EvictionPolicy::all() {
        let cache: SharedResponseCache<i64, i64> =
            SharedCache::new(ResponseCache::new(policy, 64));
        let mut pool = Pool::new(THREADS);

        pool.scoped(|scope| {
            for t in 0..THREADS {
                let cache = &cache;
                scope.execute(move || {
                    for i in 0..OPS_PER_THREAD {
                        // Overlapping keys across threads
                        let key = (i * 31 + i64::from(t)) % 200;
                        if i % 3 == 0 {
                            cache.set_response(key, i);
                        } else {
                            let _ = cache.get_response(&key);
                        }
                    }
                });
            }
        });

        let guard = cache.lock();
        assert!(guard.len() <= 64, "{policy} exceeded capacity");
        guard.check_invariants().unwrap();
    }
}

#[test]
fn test_shared_cache_counts_every_request() {
    let cache = SharedCache::new(LfuCache::<i64, i64>::new(32));
    let observed_hits = AtomicU64::new(0);
    let mut pool = Pool::new(THREADS);

    for key in 0..32 {
        cache.set_response(key, key);
    }

    pool.scoped(|scope| {
        for _ in 0..THREADS {
            let cache = &cache;
            let observed_hits = &observed_hits;
            scope.execute(move || {
                for i in 0..OPS_PER_THREAD {
                    if cache.get_response(&(i % 64)).is_some() {
                        observed_hits.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    let metrics = cache.metrics();
    let total = f64::from(THREADS) * OPS_PER_THREAD as f64;
    // Keys 0..32 never leave: no writes happen during the concurrent phase
    let resident_reads = (0..OPS_PER_THREAD).filter(|i| i % 64 < 32).count();
    assert_eq!(metrics["requests"], total);
    assert_eq!(
        metrics["cache_hits"],
        observed_hits.load(Ordering::Relaxed) as f64
    );
    assert_eq!(
        metrics["cache_hits"],
        f64::from(THREADS) * resident_reads as f64
    );
    assert_eq!(metrics["evictions"], 0.0);
}

#[test]
fn test_shared_lru_eviction_after_concurrent_reads() {
    let cache = SharedCache::new(LruCache::<i64, String>::new(4));
    for key in 0..4 {
        cache.set_response(key, format!("body-{key}"));
    }
    let mut pool = Pool::new(4);

    // Each thread reads one key; all four keys end up touched
    pool.scoped(|scope| {
        for key in 0..4i64 {
            let cache = &cache;
            scope.execute(move || {
                for _ in 0..100 {
                    assert!(cache.get_response(&key).is_some());
                }
            });
        }
    });

    // Key 0 is then touched again from this thread and must survive eviction
    cache.get_with(&0, |body: &String| assert_eq!(body, "body-0"));
    cache.set_response(4, "body-4".to_string());
    let guard = cache.lock();
    assert!(guard.contains(&0));
    assert!(guard.contains(&4));
    assert_eq!(guard.len(), 4);
    guard.check_invariants().unwrap();
}

#[test]
fn test_shared_lfu_hot_keys_survive() {
    let cache = SharedCache::new(LfuCache::<i64, i64>::new(8));
    let mut pool = Pool::new(THREADS);

    for key in 0..4 {
        cache.set_response(key, key);
        for _ in 0..10 {
            cache.get_response(&key);
        }
    }

    pool.scoped(|scope| {
        for t in 0..THREADS {
            let cache = &cache;
            scope.execute(move || {
                for i in 0..500 {
                    // Hot set: keys 0..4 are read over and over
                    let _ = cache.get_response(&(i % 4));
                    // Cold churn: a unique key per (thread, i)
                    cache.set_response(1_000 + i64::from(t) * 10_000 + i, i);
                }
            });
        }
    });

    let guard = cache.lock();
    for key in 0..4 {
        assert!(guard.contains(&key), "hot key {key} was evicted");
    }
    guard.check_invariants().unwrap();
}

#[test]
fn test_get_with_does_not_clone() {
    #[derive(Debug)]
    struct NotClone(Vec<u8>);

    let cache = SharedCache::new(LruCache::<i64, NotClone>::new(2));
    cache.set_response(1, NotClone(vec![0; 1024]));
    assert_eq!(cache.get_with(&1, |v: &NotClone| v.0.len()), Some(1024));
    assert_eq!(cache.get_with(&2, |v: &NotClone| v.0.len()), None);
}
