use super::LatencySample;
use crate::errors::Error;
use serde::Serialize;

/// Latency distribution over one run, in milliseconds. Derived and
/// recomputed per run, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionStats {
    pub count: usize,
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub median_ms: f64,
    pub p99_ms: f64,
    pub std_dev_ms: f64,
}

/// Computes distribution statistics for a recorded sample sequence.
///
/// # Errors
/// Returns `Error::Statistics` for an empty sequence.
pub fn analyze(samples: &[LatencySample]) -> Result<DistributionStats, Error> {
    let millis: Vec<f64> = samples.iter().map(|s| s.elapsed.as_secs_f64() * 1000.0).collect();
    analyze_millis(&millis)
}

/// Statistics over raw millisecond values.
///
/// Median and p99 use floor-based nearest-rank selection
/// (`sorted[floor(count * q)]`, the upper median for even counts) and the
/// standard deviation uses the population denominator. Downstream reports
/// depend on these exact formulas; do not swap in interpolating variants.
///
/// # Errors
/// Returns `Error::Statistics` for an empty slice.
pub fn analyze_millis(millis: &[f64]) -> Result<DistributionStats, Error> {
    if millis.is_empty() {
        return Err(Error::Statistics("cannot analyze an empty sample set".into()));
    }
    let count = millis.len();
    let sum: f64 = millis.iter().sum();
    let avg = sum / count as f64;
    let min = millis.iter().copied().fold(f64::INFINITY, f64::min);
    let max = millis.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let variance = millis.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / count as f64;

    // Sort a working copy; the recorded ordering stays intact for callers.
    let mut sorted = millis.to_vec();
    sorted.sort_by(f64::total_cmp);
    let median = sorted[(count as f64 * 0.5).floor() as usize];
    let p99 = sorted[(count as f64 * 0.99).floor() as usize];

    Ok(DistributionStats {
        count,
        avg_ms: avg,
        min_ms: min,
        max_ms: max,
        median_ms: median,
        p99_ms: p99,
        std_dev_ms: variance.sqrt(),
    })
}
