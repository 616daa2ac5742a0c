use readthrough::cache::{CacheStore, GetOutcome, MemoryCache, SetOutcome};
use std::time::Duration;

const TTL: Duration = Duration::from_secs(60);

#[test]
fn set_then_get_round_trips_bytes() {
    let cache = MemoryCache::new(16);
    assert!(matches!(cache.set("routes", "k1", b"payload", TTL), SetOutcome::Stored));
    match cache.get("routes", "k1") {
        GetOutcome::Hit(bytes) => assert_eq!(bytes, b"payload"),
        other => panic!("expected hit, got {other:?}"),
    }
    let snap = cache.metrics_snapshot();
    assert_eq!(snap.hits, 1);
    assert_eq!(snap.inserts, 1);
}

#[test]
fn absent_key_is_a_miss() {
    let cache = MemoryCache::new(16);
    assert!(matches!(cache.get("routes", "nope"), GetOutcome::Miss));
    assert_eq!(cache.metrics_snapshot().misses, 1);
}

#[test]
fn namespaces_are_isolated() {
    let cache = MemoryCache::new(16);
    cache.set("routes", "k", b"a", TTL);
    assert!(matches!(cache.get("players", "k"), GetOutcome::Miss));
    assert!(matches!(cache.get("routes", "k"), GetOutcome::Hit(_)));
}

#[test]
fn entries_expire_after_ttl() {
    let cache = MemoryCache::new(16);
    cache.set("routes", "k", b"a", Duration::from_millis(10));
    assert!(matches!(cache.get("routes", "k"), GetOutcome::Hit(_)));

    std::thread::sleep(Duration::from_millis(30));
    // Lazy eviction on access counts as a miss.
    assert!(matches!(cache.get("routes", "k"), GetOutcome::Miss));
    let snap = cache.metrics_snapshot();
    assert_eq!(snap.ttl_evictions, 1);
    assert_eq!(snap.misses, 1);
}

#[test]
fn set_overwrites_under_the_same_key() {
    let cache = MemoryCache::new(16);
    cache.set("routes", "k", b"old", TTL);
    cache.set("routes", "k", b"new", TTL);
    match cache.get("routes", "k") {
        GetOutcome::Hit(bytes) => assert_eq!(bytes, b"new"),
        other => panic!("expected hit, got {other:?}"),
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn purge_drops_only_expired_entries() {
    let cache = MemoryCache::new(16);
    cache.set("routes", "short", b"a", Duration::from_millis(5));
    cache.set("routes", "long", b"b", TTL);
    std::thread::sleep(Duration::from_millis(20));

    assert_eq!(cache.purge_expired_now(), 1);
    assert_eq!(cache.len(), 1);
    assert!(matches!(cache.get("routes", "long"), GetOutcome::Hit(_)));
}

#[test]
fn capacity_bound_evicts_least_recent() {
    let cache = MemoryCache::new(2);
    cache.set("routes", "a", b"1", TTL);
    cache.set("routes", "b", b"2", TTL);
    cache.set("routes", "c", b"3", TTL);
    assert_eq!(cache.len(), 2);
    assert!(matches!(cache.get("routes", "a"), GetOutcome::Miss));
    assert!(matches!(cache.get("routes", "c"), GetOutcome::Hit(_)));
}

#[test]
fn faulty_mode_reports_errors_without_storing() {
    let cache = MemoryCache::new(16);
    cache.set_faulty(true);
    assert!(matches!(cache.set("routes", "k", b"a", TTL), SetOutcome::Error(_)));
    assert!(matches!(cache.get("routes", "k"), GetOutcome::Error(_)));
    assert_eq!(cache.metrics_snapshot().faults, 2);

    cache.set_faulty(false);
    assert!(matches!(cache.get("routes", "k"), GetOutcome::Miss));
    assert!(cache.is_empty());
}
