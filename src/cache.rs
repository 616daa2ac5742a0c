use crate::errors::Error;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Outcome of a cache lookup. Produced once per `get`, consumed immediately
/// by the interceptor to decide fallthrough.
#[derive(Debug)]
pub enum GetOutcome {
    Hit(Vec<u8>),
    Miss,
    Error(Error),
}

/// Outcome of a cache write.
#[derive(Debug)]
pub enum SetOutcome {
    Stored,
    Error(Error),
}

/// Namespaced byte-string key/value store with per-entry TTL.
///
/// Faults are reported through the outcome types rather than `Result`: the
/// interceptor treats every cache fault as a miss and a failed `set` as a
/// log-only event, so no error from this trait can reach a query caller.
pub trait CacheStore: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> GetOutcome;
    fn set(&self, namespace: &str, key: &str, value: &[u8], ttl: Duration) -> SetOutcome;
}

impl<C: CacheStore + ?Sized> CacheStore for Arc<C> {
    fn get(&self, namespace: &str, key: &str) -> GetOutcome {
        (**self).get(namespace, key)
    }
    fn set(&self, namespace: &str, key: &str, value: &[u8], ttl: Duration) -> SetOutcome {
        (**self).set(namespace, key, value, ttl)
    }
}

struct Entry {
    value: Vec<u8>,
    stored_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() > self.ttl
    }
}

/// Simple metrics for observing cache behavior.
#[derive(Default)]
pub struct CacheMetrics {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub inserts: AtomicU64,
    pub faults: AtomicU64,
    pub ttl_evictions: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CacheMetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub faults: u64,
    pub ttl_evictions: u64,
}

impl CacheMetrics {
    pub fn snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
            ttl_evictions: self.ttl_evictions.load(Ordering::Relaxed),
        }
    }
}

/// In-process `CacheStore` with lazy TTL expiry on access and an LRU
/// capacity bound as a memory guard. Entries are never mutated, only
/// overwritten by a later `set` under the same key.
///
/// `set_faulty(true)` makes every operation report a fault, which is how the
/// tests exercise the interceptor's cache-down resilience path.
pub struct MemoryCache {
    store: Mutex<LruCache<(String, String), Entry>>,
    metrics: Arc<CacheMetrics>,
    faulty: AtomicBool,
}

impl MemoryCache {
    /// Creates a cache bounded to `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Mutex::new(LruCache::new(cap)),
            metrics: Arc::new(CacheMetrics::default()),
            faulty: AtomicBool::new(false),
        }
    }

    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Toggles fault injection: while set, every `get` and `set` reports an
    /// error outcome without touching the underlying map.
    pub fn set_faulty(&self, faulty: bool) {
        self.faulty.store(faulty, Ordering::Relaxed);
    }

    /// Drops every expired entry now. Returns the number evicted.
    pub fn purge_expired_now(&self) -> usize {
        let mut guard = self.store.lock();
        let expired: Vec<(String, String)> = guard
            .iter()
            .filter(|(_, e)| e.is_expired())
            .map(|(k, _)| k.clone())
            .collect();
        let count = expired.len();
        for k in expired {
            guard.pop(&k);
        }
        if count > 0 {
            self.metrics.ttl_evictions.fetch_add(count as u64, Ordering::Relaxed);
        }
        count
    }

    /// Number of live entries, expired or not.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, namespace: &str, key: &str) -> GetOutcome {
        if self.faulty.load(Ordering::Relaxed) {
            self.metrics.faults.fetch_add(1, Ordering::Relaxed);
            return GetOutcome::Error(Error::CacheFault("injected cache fault".into()));
        }
        let full_key = (namespace.to_string(), key.to_string());
        let mut guard = self.store.lock();
        match guard.get(&full_key) {
            Some(entry) if entry.is_expired() => {
                // Lazy eviction on access
                guard.pop(&full_key);
                self.metrics.ttl_evictions.fetch_add(1, Ordering::Relaxed);
                self.metrics.misses.fetch_add(1, Ordering::Relaxed);
                GetOutcome::Miss
            }
            Some(entry) => {
                self.metrics.hits.fetch_add(1, Ordering::Relaxed);
                GetOutcome::Hit(entry.value.clone())
            }
            None => {
                self.metrics.misses.fetch_add(1, Ordering::Relaxed);
                GetOutcome::Miss
            }
        }
    }

    fn set(&self, namespace: &str, key: &str, value: &[u8], ttl: Duration) -> SetOutcome {
        if self.faulty.load(Ordering::Relaxed) {
            self.metrics.faults.fetch_add(1, Ordering::Relaxed);
            return SetOutcome::Error(Error::CacheFault("injected cache fault".into()));
        }
        let entry = Entry { value: value.to_vec(), stored_at: Instant::now(), ttl };
        self.store.lock().put((namespace.to_string(), key.to_string()), entry);
        self.metrics.inserts.fetch_add(1, Ordering::Relaxed);
        SetOutcome::Stored
    }
}
