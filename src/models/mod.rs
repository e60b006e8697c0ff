//! Data models for configuration, samples, thresholds, and run results

pub mod config;
pub mod report;
pub mod sample;
pub mod threshold;

pub use config::RunConfig;
pub use report::{RunResult, RunStatus};
pub use sample::{RequestOutcome, RequestSample, SampleStatus};
pub use threshold::{Comparison, Metric, Threshold, ThresholdOutcome};
