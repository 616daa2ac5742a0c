use crate::cache::{CacheStore, GetOutcome, SetOutcome};
use crate::document::{decode_payload, encode_payload, rehydrate};
use crate::errors::Error;
use crate::query::{Filter, FindOptions, Query, QueryKind};
use crate::store::DocumentStore;
use crate::types::{CacheKey, Document};
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;

/// Read kinds cached by default. Anything outside the configured set is
/// always forwarded straight to the source of truth.
pub const DEFAULT_CACHEABLE: [QueryKind; 5] = [
    QueryKind::Count,
    QueryKind::CountDocuments,
    QueryKind::Find,
    QueryKind::FindOne,
    QueryKind::Distinct,
];

/// Runtime-swappable cacheability policy. Held per interceptor instance so
/// that two concurrent benchmark runs cannot toggle each other's caching.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    pub enabled: bool,
    pub cacheable: HashSet<QueryKind>,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self { enabled: true, cacheable: DEFAULT_CACHEABLE.into_iter().collect() }
    }
}

/// How a reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Not eligible for caching; forwarded without any cache interaction.
    Bypass,
    /// Served from the cache; the source of truth was not contacted.
    Hit,
    /// Cache had nothing usable (absent entry or fault); served by the store.
    Miss,
}

/// Result collection plus how it was obtained.
#[derive(Debug, Clone)]
pub struct QueryReply {
    pub docs: Vec<Document>,
    pub disposition: Disposition,
}

impl QueryReply {
    /// Rehydrates every document into a caller-defined domain type.
    ///
    /// # Errors
    /// Returns `Error::Json` when a document does not match `T`'s shape.
    pub fn rehydrate<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        self.docs.iter().map(rehydrate).collect()
    }

    /// Unwraps the `{"n": <i64>}` collection a count query returns.
    #[must_use]
    pub fn count(&self) -> Option<i64> {
        self.docs.first().and_then(|d| d.get_i64("n").ok())
    }

    /// Unwraps the `{"value": ...}` collection a distinct query returns.
    #[must_use]
    pub fn distinct_values(&self) -> Vec<bson::Bson> {
        self.docs.iter().filter_map(|d| d.get("value").cloned()).collect()
    }
}

/// Derives the cache key for a query: canonical JSON of
/// `{o: kind, q: filter, opt: options}`.
///
/// Derivation is pure. Object keys serialize in sorted order (serde_json's
/// default map is ordered), so semantically identical queries produce
/// byte-identical keys within one process regardless of how their maps were
/// assembled. Keys are not guaranteed portable across implementations.
pub fn derive_key(query: &Query) -> Result<CacheKey, Error> {
    #[derive(Serialize)]
    struct KeyShape<'a> {
        o: QueryKind,
        q: &'a Filter,
        opt: &'a FindOptions,
    }
    let shape = serde_json::to_value(KeyShape {
        o: query.kind,
        q: &query.filter,
        opt: &query.options,
    })?;
    Ok(shape.to_string())
}

/// Read-through cache in front of a [`DocumentStore`].
///
/// Composed by dependency injection: callers issue queries through
/// [`QueryInterceptor::execute`] instead of the store directly. Stateless
/// between calls apart from the policy, which can be toggled at runtime so a
/// benchmark can run the same workload cached and uncached against one
/// instance.
pub struct QueryInterceptor<S: DocumentStore, C: CacheStore> {
    store: S,
    cache: C,
    namespace: String,
    ttl: Duration,
    policy: RwLock<CachePolicy>,
}

impl<S: DocumentStore, C: CacheStore> QueryInterceptor<S, C> {
    pub fn new(store: S, cache: C, namespace: impl Into<String>, ttl: Duration) -> Self {
        Self::with_policy(store, cache, namespace, ttl, CachePolicy::default())
    }

    pub fn with_policy(
        store: S,
        cache: C,
        namespace: impl Into<String>,
        ttl: Duration,
        policy: CachePolicy,
    ) -> Self {
        Self { store, cache, namespace: namespace.into(), ttl, policy: RwLock::new(policy) }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Enables or disables cache interception for subsequent queries.
    pub fn set_enabled(&self, enabled: bool) {
        self.policy.write().enabled = enabled;
    }

    /// Replaces the set of cacheable operation kinds.
    pub fn set_cacheable_kinds(&self, kinds: impl IntoIterator<Item = QueryKind>) {
        self.policy.write().cacheable = kinds.into_iter().collect();
    }

    pub fn is_cacheable(&self, kind: QueryKind) -> bool {
        let policy = self.policy.read();
        policy.enabled && policy.cacheable.contains(&kind)
    }

    /// Executes a query through the cache.
    ///
    /// Cacheable kinds are looked up first; a hit is rebuilt from the stored
    /// payload without contacting the store. On a miss the store's result is
    /// returned and, when non-empty, written back with the configured TTL.
    /// Cache faults on either leg are logged and never surface to the
    /// caller; store faults always propagate.
    ///
    /// # Errors
    /// Returns `Error::Connectivity` (or another store error) only when the
    /// source of truth itself fails.
    pub fn execute(&self, query: &Query) -> Result<QueryReply, Error> {
        if !self.is_cacheable(query.kind) {
            let docs = self.store.execute(&self.namespace, query)?;
            return Ok(QueryReply { docs, disposition: Disposition::Bypass });
        }

        let key = derive_key(query)?;
        log::debug!("key: {key}");

        match self.cache.get(&self.namespace, &key) {
            GetOutcome::Hit(payload) => match decode_payload(&payload) {
                Ok(docs) => {
                    log::debug!("cache hit: {} bytes", payload.len());
                    return Ok(QueryReply { docs, disposition: Disposition::Hit });
                }
                // An undecodable payload is a cache fault like any other.
                Err(e) => log::warn!("cache payload decode failed, treating as miss: {e}"),
            },
            GetOutcome::Miss => log::debug!("cache miss: {key}"),
            GetOutcome::Error(e) => log::warn!("cache get failed, treating as miss: {e}"),
        }

        let docs = self.store.execute(&self.namespace, query)?;

        if !docs.is_empty() {
            match encode_payload(&docs) {
                Ok(payload) => {
                    if let SetOutcome::Error(e) =
                        self.cache.set(&self.namespace, &key, &payload, self.ttl)
                    {
                        // The caller already has its result; log and move on.
                        log::warn!("cache set failed for key {key}: {e}");
                    }
                }
                Err(e) => log::warn!("cache payload encode failed for key {key}: {e}"),
            }
        }

        Ok(QueryReply { docs, disposition: Disposition::Miss })
    }
}
