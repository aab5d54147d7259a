use crate::classify::Classification;
use crate::dedup::BucketedEvents;
use std::fmt::Write;

/// Renders the bucketed error report: one header per 60-second bucket in
/// ascending time order, followed by the bucket's events indented two
/// spaces.
pub fn render_error_report(buckets: &BucketedEvents) -> String {
    let mut out = String::new();
    for (bucket, events) in buckets {
        let _ = writeln!(out, "\nEvents at {}:", bucket.format("%Y-%m-%d %H:%M:%S"));
        for event in events {
            let _ = writeln!(out, "  {event}");
        }
    }
    out
}

/// Presentation filter over classification results: keep lines mentioning
/// "success" in any casing, regardless of verdict. This layers on top of
/// classification and does not change the results themselves.
pub fn success_results(results: &[Classification]) -> Vec<&Classification> {
    results
        .iter()
        .filter(|c| c.line.to_lowercase().contains("success"))
        .collect()
}

/// Renders the success report: one `{line} | {verdict}` row per retained
/// result.
pub fn render_success_report(results: &[Classification]) -> String {
    let mut out = String::new();
    for c in success_results(results) {
        let _ = writeln!(out, "{} | {}", c.line, c.verdict);
    }
    out
}
