//! Report output: formatter trait, implementations, and assembly

pub mod colored;
pub mod formatter;

pub use colored::ColoredFormatter;
pub use formatter::{PlainFormatter, ReportFormatter};

use crate::error::Result;
use crate::models::report::RunResult;

/// Factory for creating the right formatter for the terminal
pub struct ReportFormatterFactory;

impl ReportFormatterFactory {
    pub fn create_formatter(enable_color: bool) -> Box<dyn ReportFormatter> {
        if enable_color {
            Box::new(ColoredFormatter)
        } else {
            Box::new(PlainFormatter)
        }
    }
}

/// Assemble the complete end-of-run report
pub fn render_report(
    formatter: &dyn ReportFormatter,
    result: &RunResult,
    verbose: bool,
) -> Result<String> {
    let mut out = String::new();

    out.push_str(&formatter.format_header("Service Load Test Results")?);
    out.push('\n');
    out.push_str(&formatter.format_summary(&result.stats)?);
    out.push('\n');
    out.push_str(&formatter.format_thresholds(result)?);
    out.push('\n');

    if verbose {
        out.push_str(&format!(
            "Run {} started {} completed {}\n\n",
            result.run_id,
            result.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
            result.completed_at.format("%Y-%m-%d %H:%M:%S UTC"),
        ));
    }

    out.push_str(&formatter.format_verdict(result)?);
    Ok(out)
}
