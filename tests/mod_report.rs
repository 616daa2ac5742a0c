use readthrough::bench::analyze_millis;
use readthrough::bench::report::{render_comparison, render_html};

fn sample_runs() -> [(&'static str, readthrough::bench::DistributionStats); 2] {
    [
        ("Without Cache", analyze_millis(&[12.0, 15.0, 11.0, 40.0, 13.0]).unwrap()),
        ("With Cache", analyze_millis(&[2.0, 1.0, 1.5, 9.0, 1.2]).unwrap()),
    ]
}

#[test]
fn comparison_table_is_deterministic() {
    let runs = sample_runs();
    let a = render_comparison(5, &runs);
    let b = render_comparison(5, &runs);
    assert_eq!(a, b);
}

#[test]
fn comparison_table_lists_labels_and_metrics() {
    let out = render_comparison(5, &sample_runs());
    assert!(out.contains("Performance comparison for 5 iterations"));
    for needle in ["Without Cache", "With Cache", "Average", "P99", "Min", "Max", "Median", "Std Dev"]
    {
        assert!(out.contains(needle), "missing {needle} in:\n{out}");
    }
    // max of the uncached run
    assert!(out.contains("40.000"));
}

#[test]
fn html_report_is_self_contained() {
    let runs = sample_runs();
    let html = render_html(7, &runs);
    assert_eq!(html, render_html(7, &runs));
    assert!(html.contains("Performance Comparison for 7 Iterations"));
    assert!(html.contains("Without Cache"));
    assert!(html.contains("With Cache"));
    // No fetched assets: rendering must stay a pure function of the stats.
    assert!(!html.contains("https://"));
    assert!(!html.contains("<script"));
}

#[test]
fn bars_scale_against_the_largest_value() {
    let html = render_html(7, &sample_runs());
    // 40 ms is the ceiling; it is both the max and the p99 of the uncached
    // run, so exactly those two bars render full width.
    assert_eq!(html.matches("width:100.00%").count(), 2);
}
