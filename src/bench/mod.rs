//! Workload driver and latency statistics.
//!
//! Iterations run strictly sequentially, one query in flight at a time, so
//! the recorded latencies are free of queueing effects. Concurrent load
//! measurement is out of scope.

pub mod report;
pub mod stats;

pub use stats::{DistributionStats, analyze, analyze_millis};

use crate::cache::CacheStore;
use crate::errors::Error;
use crate::intercept::{Disposition, QueryInterceptor};
use crate::query::{Filter, FindOptions, Query};
use crate::store::DocumentStore;
use bson::Bson;
use rand::Rng;
use std::time::{Duration, Instant};

/// How the query parameter varies across iterations.
#[derive(Debug, Clone)]
pub enum ParamMode {
    /// Uniformly random from a precomputed domain; mixed hit rate.
    Random(Vec<Bson>),
    /// Same value every iteration; forces a high hit rate once warm.
    Fixed(Bson),
    /// A never-before-seen value each iteration; guarantees a miss.
    FreshPerIteration,
}

/// One benchmark run: `iterations` equality queries on `param_field`.
#[derive(Debug, Clone)]
pub struct Workload {
    pub iterations: usize,
    pub param_field: String,
    pub mode: ParamMode,
}

/// Classification of one recorded query latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyClass {
    Uncached,
    Hit,
    Miss,
}

/// One timed query. Immutable once recorded; samples keep issue order for
/// the lifetime of a run.
#[derive(Debug, Clone, Copy)]
pub struct LatencySample {
    pub elapsed: Duration,
    pub class: LatencyClass,
}

impl From<Disposition> for LatencyClass {
    fn from(d: Disposition) -> Self {
        match d {
            Disposition::Bypass => Self::Uncached,
            Disposition::Hit => Self::Hit,
            Disposition::Miss => Self::Miss,
        }
    }
}

/// Drives `workload.iterations` queries through the interceptor, timing each
/// call from just before issue to just after it resolves.
///
/// # Errors
/// Returns `Error::Configuration` for an empty random domain and propagates
/// store connectivity errors.
pub fn run_workload<S: DocumentStore, C: CacheStore>(
    interceptor: &QueryInterceptor<S, C>,
    workload: &Workload,
) -> Result<Vec<LatencySample>, Error> {
    if let ParamMode::Random(domain) = &workload.mode
        && domain.is_empty()
    {
        return Err(Error::Configuration("workload parameter domain is empty".into()));
    }

    let mut rng = rand::rng();
    let mut samples = Vec::with_capacity(workload.iterations);

    for i in 0..workload.iterations {
        if i % 100 == 0 {
            log::info!("iteration {i}");
        }
        let param = match &workload.mode {
            ParamMode::Random(domain) => domain[rng.random_range(0..domain.len())].clone(),
            ParamMode::Fixed(value) => value.clone(),
            ParamMode::FreshPerIteration => Bson::String(uuid::Uuid::new_v4().to_string()),
        };
        let query =
            Query::find(Filter::eq(workload.param_field.clone(), param), FindOptions::default());

        let start = Instant::now();
        let reply = interceptor.execute(&query)?;
        let elapsed = start.elapsed();

        samples.push(LatencySample { elapsed, class: reply.disposition.into() });
    }

    Ok(samples)
}
