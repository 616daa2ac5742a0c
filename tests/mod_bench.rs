use bson::{Bson, doc};
use readthrough::bench::{LatencyClass, ParamMode, Workload, run_workload};
use readthrough::{Filter, MemoryCache, MemoryStore, Query, QueryInterceptor};
use std::sync::Arc;
use std::time::Duration;

fn harness() -> (Arc<MemoryStore>, QueryInterceptor<Arc<MemoryStore>, MemoryCache>) {
    let store = Arc::new(MemoryStore::new());
    store.seed(
        "routes",
        vec![
            doc! { "airline": { "name": "Aeroflot" }, "stops": 0 },
            doc! { "airline": { "name": "Qantas" }, "stops": 1 },
        ],
    );
    let interceptor = QueryInterceptor::new(
        Arc::clone(&store),
        MemoryCache::new(1024),
        "routes",
        Duration::from_secs(60),
    );
    (store, interceptor)
}

fn fixed_workload(iterations: usize) -> Workload {
    Workload {
        iterations,
        param_field: "airline.name".into(),
        mode: ParamMode::Fixed(Bson::String("Aeroflot".into())),
    }
}

#[test]
fn fixed_parameter_warms_after_first_miss() {
    let (store, interceptor) = harness();
    let samples = run_workload(&interceptor, &fixed_workload(5)).unwrap();
    assert_eq!(samples.len(), 5);
    assert_eq!(samples[0].class, LatencyClass::Miss);
    assert!(samples[1..].iter().all(|s| s.class == LatencyClass::Hit));
    assert_eq!(store.executed(), 1, "only the cold call reaches the store");
}

#[test]
fn fresh_parameters_never_hit() {
    let (store, interceptor) = harness();
    let workload = Workload {
        iterations: 6,
        param_field: "airline.name".into(),
        mode: ParamMode::FreshPerIteration,
    };
    let samples = run_workload(&interceptor, &workload).unwrap();
    assert!(samples.iter().all(|s| s.class == LatencyClass::Miss));
    assert_eq!(store.executed(), 6);
}

#[test]
fn disabled_caching_records_uncached_samples() {
    let (store, interceptor) = harness();
    interceptor.set_enabled(false);
    let samples = run_workload(&interceptor, &fixed_workload(4)).unwrap();
    assert!(samples.iter().all(|s| s.class == LatencyClass::Uncached));
    assert_eq!(store.executed(), 4);
}

#[test]
fn random_domain_mixes_hits_and_misses() {
    let (store, interceptor) = harness();
    let domain = interceptor
        .execute(&Query::distinct("airline.name", Filter::True))
        .unwrap()
        .distinct_values();
    let workload = Workload {
        iterations: 40,
        param_field: "airline.name".into(),
        mode: ParamMode::Random(domain),
    };
    let samples = run_workload(&interceptor, &workload).unwrap();
    assert_eq!(samples.len(), 40);
    assert!(samples.iter().all(|s| s.class != LatencyClass::Uncached));
    let misses = samples.iter().filter(|s| s.class == LatencyClass::Miss).count();
    // Two domain values, so at most two cold misses over forty iterations.
    assert!(misses <= 2);
    assert!(store.executed() <= 3); // distinct + one cold call per value
}

#[test]
fn empty_random_domain_is_rejected() {
    let (_store, interceptor) = harness();
    let workload = Workload {
        iterations: 3,
        param_field: "airline.name".into(),
        mode: ParamMode::Random(Vec::new()),
    };
    let err = run_workload(&interceptor, &workload).unwrap_err();
    assert!(matches!(err, readthrough::Error::Configuration(_)));
}

#[test]
fn store_outage_mid_run_propagates() {
    let (store, interceptor) = harness();
    interceptor.set_enabled(false);
    store.fail_next(1);
    let err = run_workload(&interceptor, &fixed_workload(3)).unwrap_err();
    assert!(matches!(err, readthrough::Error::Connectivity(_)));
}

#[test]
fn samples_keep_issue_order_and_real_durations() {
    let (_store, interceptor) = harness();
    let samples = run_workload(&interceptor, &fixed_workload(3)).unwrap();
    // Classification order mirrors issue order: cold miss first, hits after.
    assert_eq!(samples[0].class, LatencyClass::Miss);
    assert_eq!(samples[2].class, LatencyClass::Hit);
    assert!(samples.iter().all(|s| s.elapsed > Duration::ZERO));
}
