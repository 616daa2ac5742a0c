//! Read-through query caching for document stores, plus a benchmark harness
//! that measures what the cache buys you.
//!
//! The [`intercept::QueryInterceptor`] sits between a query-issuing caller
//! and a [`store::DocumentStore`]: cacheable read kinds are looked up in a
//! [`cache::CacheStore`] first and fall through to the store on a miss, with
//! the result written back under a deterministic structural key. The
//! [`bench`] module drives workloads through the interceptor sequentially
//! and computes comparative latency distributions.

pub mod bench;
pub mod cache;
pub mod config;
pub mod document;
pub mod errors;
pub mod intercept;
pub mod logger;
pub mod query;
pub mod store;
pub mod types;

pub use crate::bench::{
    LatencyClass, LatencySample, ParamMode, Workload, analyze, run_workload,
};
pub use crate::cache::{CacheStore, GetOutcome, MemoryCache, SetOutcome};
pub use crate::config::Config;
pub use crate::errors::Error;
pub use crate::intercept::{CachePolicy, Disposition, QueryInterceptor, QueryReply, derive_key};
pub use crate::query::{Filter, FindOptions, Query, QueryKind};
pub use crate::store::{DocumentStore, MemoryStore};
