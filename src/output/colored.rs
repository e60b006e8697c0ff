//! Colored report formatter

use crate::error::Result;
use crate::models::report::{RunResult, RunStatus};
use crate::output::formatter::{fmt_err, latency_cell, ReportFormatter};
use crate::stats::RunStats;
use colored::Colorize;
use std::fmt::Write as _;

/// Terminal formatter using ANSI colors
pub struct ColoredFormatter;

impl ReportFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{}", "=".repeat(72).bright_blue()).map_err(fmt_err)?;
        writeln!(out, "  {}", title.bold()).map_err(fmt_err)?;
        writeln!(out, "{}", "=".repeat(72).bright_blue()).map_err(fmt_err)?;
        Ok(out)
    }

    fn format_summary(&self, stats: &RunStats) -> Result<String> {
        let mut out = String::new();

        let failed = if stats.failed_requests > 0 {
            stats.failed_requests.to_string().red().to_string()
        } else {
            stats.failed_requests.to_string()
        };
        writeln!(
            out,
            "Requests:    {} total, {} succeeded, {} failed (fail rate {:.3})",
            stats.total_requests,
            stats.successful_requests.to_string().green(),
            failed,
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
            latency_cell(stats.avg_ms).cyan(),
            latency_cell(stats.min_ms),
            latency_cell(stats.max_ms),
            stats.std_dev_ms
        )
        .map_err(fmt_err)?;
        writeln!(
            out,
            "Percentiles: p50 {}  p95 {}  p99 {}",
            latency_cell(stats.p50_ms).cyan(),
            latency_cell(stats.p95_ms).cyan(),
            latency_cell(stats.p99_ms).cyan()
        )
        .map_err(fmt_err)?;
        Ok(out)
    }

    fn format_thresholds(&self, result: &RunResult) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{}", "Thresholds:".bold()).map_err(fmt_err)?;
        for outcome in &result.threshold_outcomes {
            let mark = if outcome.passed {
                "PASS".green().bold()
            } else {
                "FAIL".red().bold()
            };
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
        let verdict = match result.status {
            RunStatus::Passed => result.status.as_str().green().bold(),
            _ => result.status.as_str().red().bold(),
        };
        Ok(format!("Overall: {}\n", verdict))
    }
}
