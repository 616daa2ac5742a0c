use super::stats::DistributionStats;
use std::fmt::Write;

const METRICS: [(&str, fn(&DistributionStats) -> f64); 6] = [
    ("Average", |s| s.avg_ms),
    ("P99", |s| s.p99_ms),
    ("Min", |s| s.min_ms),
    ("Max", |s| s.max_ms),
    ("Median", |s| s.median_ms),
    ("Std Dev", |s| s.std_dev_ms),
];

/// Renders labeled runs side by side as a plain text table. Pure function of
/// its inputs; the same stats always render the same bytes.
#[must_use]
pub fn render_comparison(iterations: usize, runs: &[(&str, DistributionStats)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Performance comparison for {iterations} iterations (ms)");
    let _ = write!(out, "{:<12}", "");
    for (label, _) in runs {
        let _ = write!(out, "{label:>16}");
    }
    out.push('\n');
    for (name, extract) in METRICS {
        let _ = write!(out, "{name:<12}");
        for (_, stats) in runs {
            let _ = write!(out, "{:>16.3}", extract(stats));
        }
        out.push('\n');
    }
    out
}

/// Renders a self-contained static HTML page with one bar per metric per
/// run, widths scaled against the largest value. No external assets are
/// fetched, so the output is a deterministic function of the stats.
#[must_use]
pub fn render_html(iterations: usize, runs: &[(&str, DistributionStats)]) -> String {
    let scale = runs
        .iter()
        .flat_map(|(_, s)| METRICS.iter().map(move |(_, extract)| extract(s)))
        .fold(0.0_f64, f64::max)
        .max(f64::MIN_POSITIVE);

    let mut body = String::new();
    for (name, extract) in METRICS {
        let _ = writeln!(body, "    <h2>{name}</h2>");
        for (label, stats) in runs {
            let value = extract(stats);
            let width = (value / scale * 100.0).clamp(0.5, 100.0);
            let _ = writeln!(
                body,
                "    <div class=\"row\"><span class=\"label\">{label}</span>\
<div class=\"bar\" style=\"width:{width:.2}%\"></div>\
<span class=\"value\">{value:.3} ms</span></div>"
            );
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
<title>Performance Comparison</title>\n<style>\n\
body {{ font-family: sans-serif; margin: 2em; }}\n\
.row {{ display: flex; align-items: center; margin: 2px 0; }}\n\
.label {{ width: 10em; }}\n\
.value {{ margin-left: 0.5em; }}\n\
.bar {{ height: 1em; background: #4bc0c0; }}\n\
.row:nth-child(odd) .bar {{ background: #ffce56; }}\n\
</style>\n</head>\n<body>\n\
<h1>Performance Comparison for {iterations} Iterations</h1>\n{body}</body>\n</html>\n"
    )
}
