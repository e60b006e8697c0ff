//! Service Load Tester
//!
//! A lightweight load-testing tool that drives a configurable number of
//! virtual users against a service health endpoint for a fixed duration,
//! then evaluates latency percentiles and the failure rate against
//! pass/fail thresholds.

pub mod cli;
pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod models;
pub mod output;
pub mod stats;

// Re-export commonly used types
pub use client::{HealthCheckClient, RequestExecutor};
pub use driver::LoadDriver;
pub use error::{AppError, Result};
pub use models::{RequestOutcome, RequestSample, RunConfig, RunResult, RunStatus, Threshold};
pub use output::{ColoredFormatter, PlainFormatter, ReportFormatter, ReportFormatterFactory};
pub use stats::RunStats;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_VIRTUAL_USERS: u32 = 10;
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(60);
    pub const DEFAULT_THINK_TIME: Duration = Duration::from_secs(1);
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
