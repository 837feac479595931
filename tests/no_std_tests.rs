#![no_std]
extern crate alloc;
extern crate response_cache;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use response_cache::config::{EvictionPolicy, LfuCacheConfig, LruCacheConfig};
use response_cache::metrics::CacheMetrics;
use response_cache::CacheStorage;
use response_cache::LfuCache;
use response_cache::LruCache;
use response_cache::ResponseCache;

// Helper functions to create caches with the init pattern
fn make_lru<K: core::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    LruCache::init(LruCacheConfig { capacity: cap }, None)
}

fn make_lfu<K: core::hash::Hash + Eq + Clone, V>(cap: usize) -> LfuCache<K, V> {
    LfuCache::init(LfuCacheConfig { capacity: cap }, None)
}

#[test]
fn test_lru_in_no_std() {
    let mut cache = make_lru(2);

    // Using String as it requires the alloc crate
    let key1 = String::from("key1");
    let key2 = String::from("key2");
    let key3 = String::from("key3");

    cache.set_response(key1.clone(), 1);
    cache.set_response(key2.clone(), 2);

    assert_eq!(*cache.get_response(&key1).unwrap(), 1);
    assert_eq!(*cache.get_response(&key2).unwrap(), 2);

    // This should evict key1
    cache.set_response(key3.clone(), 3);

    assert!(cache.get_response(&key1).is_none());
    assert_eq!(*cache.get_response(&key2).unwrap(), 2);
    assert_eq!(*cache.get_response(&key3).unwrap(), 3);
}

#[test]
fn test_lfu_in_no_std() {
    let mut cache = make_lfu(2);

    let key1 = String::from("key1");
    let key2 = String::from("key2");

    cache.set_response(key1.clone(), 1);
    cache.set_response(key2.clone(), 2);

    // Access key1 multiple times to increase its frequency
    cache.get_response(&key1);
    cache.get_response(&key1);

    // Add a new item, which should evict key2 (lower frequency)
    let key3 = String::from("key3");
    cache.set_response(key3.clone(), 3);

    assert_eq!(*cache.get_response(&key1).unwrap(), 1);
    assert!(cache.get_response(&key2).is_none());
    assert_eq!(*cache.get_response(&key3).unwrap(), 3);
}

#[test]
fn test_response_cache_in_no_std() {
    for policy in EvictionPolicy::all() {
        let mut cache: ResponseCache = ResponseCache::new(policy, 4);
        for i in 0..8i64 {
            cache.set_response(i, format!("body-{}", i));
        }
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.algorithm_name(), policy.as_str());
        assert_eq!(
            cache.get_response(&7).map(String::as_str),
            Some("body-7")
        );
    }
}

#[test]
fn test_complex_types_in_no_std() {
    let mut cache = make_lru(2);

    let key1 = Vec::from([1u8, 2, 3]);
    let key2 = Vec::from([4u8, 5, 6]);

    cache.set_response(key1.clone(), format!("value-{}", 1));
    cache.set_response(key2.clone(), format!("value-{}", 2));

    assert_eq!(
        cache.get_response(&key1).map(String::as_str),
        Some("value-1")
    );
    assert_eq!(
        cache.get_response(&key2).map(String::as_str),
        Some("value-2")
    );
}
