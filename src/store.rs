use crate::errors::Error;
use crate::query::types::MAX_LIMIT;
use crate::query::{Query, QueryKind, compare_docs, eval_filter, get_path, project_fields};
use crate::types::Document;
use bson::{Bson, doc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// The source-of-truth store behind the interceptor.
///
/// Implementations may block on network I/O. Connectivity faults propagate
/// to the caller; the interceptor never retries them.
pub trait DocumentStore: Send + Sync {
    /// Executes one query against the named collection.
    ///
    /// Scalar results are wrapped so every kind returns a collection:
    /// counts come back as a single `{"n": <i64>}` document, distinct values
    /// as one `{"value": <bson>}` document each, and deletes as a single
    /// `{"deleted": <i64>}` document. Inserts return an empty collection.
    ///
    /// # Errors
    /// Returns `Error::Connectivity` when the store is unreachable.
    fn execute(&self, collection: &str, query: &Query) -> Result<Vec<Document>, Error>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn execute(&self, collection: &str, query: &Query) -> Result<Vec<Document>, Error> {
        (**self).execute(collection, query)
    }
}

/// In-process reference implementation holding named collections of
/// documents. Used by the benchmark harness and as a test double; the
/// `executed` counter makes forwarding observable.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    executed: AtomicU64,
    outages: AtomicU64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds documents directly, without going through `execute`.
    pub fn seed(&self, collection: &str, docs: Vec<Document>) {
        self.collections.write().entry(collection.to_string()).or_default().extend(docs);
    }

    /// Number of `execute` calls served so far.
    pub fn executed(&self) -> u64 {
        self.executed.load(Ordering::Relaxed)
    }

    /// Makes the next `n` `execute` calls fail with a connectivity error.
    pub fn fail_next(&self, n: u64) {
        self.outages.store(n, Ordering::Relaxed);
    }

    fn matching(&self, collection: &str, query: &Query) -> Vec<Document> {
        let guard = self.collections.read();
        let Some(docs) = guard.get(collection) else { return Vec::new() };
        docs.iter().filter(|d| eval_filter(d, &query.filter)).cloned().collect()
    }
}

impl DocumentStore for MemoryStore {
    fn execute(&self, collection: &str, query: &Query) -> Result<Vec<Document>, Error> {
        self.executed.fetch_add(1, Ordering::Relaxed);
        if self.outages.load(Ordering::Relaxed) > 0 {
            self.outages.fetch_sub(1, Ordering::Relaxed);
            return Err(Error::Connectivity("store unreachable".into()));
        }

        match query.kind {
            QueryKind::Find | QueryKind::FindOne => {
                let mut out = self.matching(collection, query);
                if let Some(sort) = &query.options.sort {
                    out.sort_by(|a, b| compare_docs(a, b, sort));
                }
                let skip = query.options.skip.unwrap_or(0);
                let limit = query.options.limit.unwrap_or(usize::MAX).min(MAX_LIMIT);
                let end = skip.saturating_add(limit).min(out.len());
                let mut out: Vec<Document> =
                    if skip >= out.len() { Vec::new() } else { out[skip..end].to_vec() };
                if let Some(fields) = &query.options.projection {
                    out = out.iter().map(|d| project_fields(d, fields)).collect();
                }
                Ok(out)
            }
            QueryKind::Count | QueryKind::CountDocuments => {
                let n = self.matching(collection, query).len() as i64;
                Ok(vec![doc! { "n": n }])
            }
            QueryKind::Distinct => {
                let path = query.options.distinct.as_deref().ok_or_else(|| {
                    Error::Query("distinct query is missing its target path".into())
                })?;
                let mut seen: Vec<Bson> = Vec::new();
                for d in self.matching(collection, query) {
                    if let Some(v) = get_path(&d, path)
                        && !seen.contains(v)
                    {
                        seen.push(v.clone());
                    }
                }
                Ok(seen.into_iter().map(|v| doc! { "value": v }).collect())
            }
            QueryKind::InsertOne | QueryKind::InsertMany => {
                self.seed(collection, query.documents.clone());
                Ok(Vec::new())
            }
            QueryKind::DeleteMany => {
                let mut guard = self.collections.write();
                let deleted = match guard.get_mut(collection) {
                    Some(docs) => {
                        let before = docs.len();
                        docs.retain(|d| !eval_filter(d, &query.filter));
                        (before - docs.len()) as i64
                    }
                    None => 0,
                };
                Ok(vec![doc! { "deleted": deleted }])
            }
        }
    }
}
