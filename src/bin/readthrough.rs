use bson::{Bson, doc};
use clap::Parser;
use fake::Fake;
use fake::faker::company::en::CompanyName;
use rand::Rng;
use rand::seq::IndexedRandom;
use readthrough::bench::report::{render_comparison, render_html};
use readthrough::bench::{ParamMode, Workload, analyze, run_workload};
use readthrough::{MemoryCache, MemoryStore, Query, QueryInterceptor};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Benchmark a read-through cache against direct document-store queries.
#[derive(Debug, Parser)]
#[command(name = "readthrough", version)]
struct Cli {
    /// Queries to issue per run (one uncached run, one cached run).
    iterations: usize,

    /// Documents to seed the store with before measuring.
    #[arg(long, default_value_t = 2000)]
    seed_docs: usize,

    /// Distinct airline names in the seed data, i.e. the parameter domain.
    #[arg(long, default_value_t = 25)]
    airlines: usize,

    /// Also write the comparison as a static HTML page.
    #[arg(long)]
    html: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    readthrough::logger::configure_from_env();
    let cli = Cli::parse();

    let namespace =
        std::env::var(readthrough::config::ENV_COLLECTION_NAME).unwrap_or_else(|_| "routes".into());
    let ttl = Duration::from_secs(60);

    let store = Arc::new(MemoryStore::new());
    let cache = MemoryCache::new(4096);
    let interceptor = QueryInterceptor::new(Arc::clone(&store), cache, namespace, ttl);

    seed_routes(&interceptor, cli.seed_docs, cli.airlines)?;

    let domain = interceptor
        .execute(&Query::distinct("airline.name", readthrough::Filter::True))?
        .distinct_values();
    log::info!("seeded {} documents across {} airlines", cli.seed_docs, domain.len());

    let workload = Workload {
        iterations: cli.iterations,
        param_field: "airline.name".into(),
        mode: ParamMode::Random(domain),
    };

    interceptor.set_enabled(false);
    let without_cache = run_workload(&interceptor, &workload)?;

    interceptor.set_enabled(true);
    let with_cache = run_workload(&interceptor, &workload)?;

    let runs = [
        ("Without Cache", analyze(&without_cache)?),
        ("With Cache", analyze(&with_cache)?),
    ];
    print!("{}", render_comparison(cli.iterations, &runs));

    if let Some(path) = cli.html {
        std::fs::write(&path, render_html(cli.iterations, &runs))?;
        println!("HTML report written to {}", path.display());
    }

    Ok(())
}

/// Seeds route documents through the interceptor's write path, which
/// bypasses the cache by design.
fn seed_routes(
    interceptor: &QueryInterceptor<Arc<MemoryStore>, MemoryCache>,
    count: usize,
    airline_count: usize,
) -> Result<(), readthrough::Error> {
    let airlines: Vec<String> =
        (0..airline_count.max(1)).map(|_| CompanyName().fake::<String>()).collect();
    let mut rng = rand::rng();
    let airport = |rng: &mut rand::rngs::ThreadRng| -> String {
        (0..3).map(|_| rng.random_range(b'A'..=b'Z') as char).collect()
    };

    let docs = (0..count)
        .map(|_| {
            let name = airlines.choose(&mut rng).cloned().unwrap_or_default();
            doc! {
                "airline": { "name": name },
                "src_airport": airport(&mut rng),
                "dst_airport": airport(&mut rng),
                "stops": Bson::Int32(rng.random_range(0..3)),
            }
        })
        .collect();

    interceptor.execute(&Query::insert_many(docs))?;
    Ok(())
}
