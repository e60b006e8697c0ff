//! Report formatting trait and the plain-text implementation

use crate::error::Result;
use crate::models::report::RunResult;
use crate::stats::RunStats;
use std::fmt::Write as _;

/// Formats the end-of-run report sections
pub trait ReportFormatter: Send + Sync {
    /// Format the report header
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format aggregate counts and latency statistics
    fn format_summary(&self, stats: &RunStats) -> Result<String>;

    /// Format the per-threshold outcome lines, in configured order
    fn format_thresholds(&self, result: &RunResult) -> Result<String>;

    /// Format the final PASSED/FAILED banner
    fn format_verdict(&self, result: &RunResult) -> Result<String>;
}

/// Format a latency value, keeping the infinite "no successful samples" case readable
pub(crate) fn latency_cell(value_ms: f64) -> String {
    if value_ms.is_infinite() {
        "inf".to_string()
    } else {
        format!("{:.1}ms", value_ms)
    }
}

/// Plain text formatter without colors
pub struct PlainFormatter;

impl ReportFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{}", "=".repeat(72)).map_err(fmt_err)?;
        writeln!(out, "  {}", title).map_err(fmt_err)?;
        writeln!(out, "{}", "=".repeat(72)).map_err(fmt_err)?;
        Ok(out)
    }

    fn format_summary(&self, stats: &RunStats) -> Result<String> {
        let mut out = String::new();
        writeln!(
            out,
            "Requests:    {} total, {} succeeded, {} failed (fail rate {:.3})",
            stats.total_requests,
            stats.successful_requests,
            stats.failed_requests,
            stats.failure_rate
        )
        .map_err(fmt_err)?;
        writeln!(
            out,
            "Throughput:  {:.1} req/s over {:.1}s",
            stats.requests_per_second(),
            stats.elapsed.as_secs_f64()
        )
        .map_err(fmt_err)?;
        writeln!(
            out,
            "Latency:     avg {}  min {}  max {}  stddev {:.1}ms",
            latency_cell(stats.avg_ms),
            latency_cell(stats.min_ms),
            latency_cell(stats.max_ms),
            stats.std_dev_ms
        )
        .map_err(fmt_err)?;
        writeln!(
            out,
            "Percentiles: p50 {}  p95 {}  p99 {}",
            latency_cell(stats.p50_ms),
            latency_cell(stats.p95_ms),
            latency_cell(stats.p99_ms)
        )
        .map_err(fmt_err)?;
        Ok(out)
    }

    fn format_thresholds(&self, result: &RunResult) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "Thresholds:").map_err(fmt_err)?;
        for outcome in &result.threshold_outcomes {
            let mark = if outcome.passed { "PASS" } else { "FAIL" };
            writeln!(
                out,
                "  {}  {:<16} observed {}",
                mark,
                outcome.threshold.to_string(),
                outcome.format_observed()
            )
            .map_err(fmt_err)?;
        }
        Ok(out)
    }

    fn format_verdict(&self, result: &RunResult) -> Result<String> {
        Ok(format!("Overall: {}\n", result.status.as_str()))
    }
}

pub(crate) fn fmt_err(e: std::fmt::Error) -> crate::error::AppError {
    crate::error::AppError::internal(format!("Formatting failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample::{RequestOutcome, RequestSample};
    use crate::models::threshold::Threshold;
    use chrono::Utc;
    use std::time::Duration;

    fn sample_result(http_status: u16) -> RunResult {
        let samples: Vec<RequestSample> = (0..10)
            .map(|i| {
                RequestSample::from_outcome(
                    i % 2,
                    Utc::now(),
                    Duration::from_millis(50 + i as u64),
                    RequestOutcome::Response { http_status },
                )
            })
            .collect();
        let stats = RunStats::from_samples(&samples, Duration::from_secs(1));
        let thresholds: Vec<Threshold> =
            vec!["p95<1000".parse().unwrap(), "fail_rate<0.1".parse().unwrap()];
        let outcomes = thresholds.iter().map(|t| t.evaluate(&stats)).collect();
        RunResult::new(stats, outcomes, samples, Utc::now())
    }

    #[test]
    fn test_summary_contains_counts_and_percentiles() {
        let result = sample_result(200);
        let summary = PlainFormatter.format_summary(&result.stats).unwrap();
        assert!(summary.contains("10 total"));
        assert!(summary.contains("10 succeeded"));
        assert!(summary.contains("p95"));
    }

    #[test]
    fn test_threshold_lines_show_pass() {
        let result = sample_result(200);
        let lines = PlainFormatter.format_thresholds(&result).unwrap();
        assert!(lines.contains("PASS  p95<1000"));
        assert!(lines.contains("PASS  fail_rate<0.1"));
        assert!(!lines.contains("FAIL"));
    }

    #[test]
    fn test_failed_threshold_identified() {
        let result = sample_result(500);
        let lines = PlainFormatter.format_thresholds(&result).unwrap();
        assert!(lines.contains("FAIL  fail_rate<0.1"));
    }

    #[test]
    fn test_verdict_matches_status() {
        assert!(PlainFormatter
            .format_verdict(&sample_result(200))
            .unwrap()
            .contains("PASSED"));
        assert!(PlainFormatter
            .format_verdict(&sample_result(500))
            .unwrap()
            .contains("FAILED"));
    }

    #[test]
    fn test_infinite_latency_rendered_readably() {
        assert_eq!(latency_cell(f64::INFINITY), "inf");
        assert_eq!(latency_cell(12.34), "12.3ms");
    }
}
