//! Aggregate statistics over the samples of one run

use crate::models::sample::RequestSample;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Aggregate statistics computed from a run's result log
///
/// Latency figures are computed over successful samples only; failed
/// requests (no completed response) contribute to the failure rate but not
/// to the latency distribution. With zero successful samples the latency
/// figures are infinite, so any upper-bound latency threshold fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Total number of requests issued across all virtual users
    pub total_requests: u64,

    /// Number of successful (2xx) requests
    pub successful_requests: u64,

    /// Number of failed requests (non-2xx, transport error, or timeout)
    pub failed_requests: u64,

    /// Fraction of failed requests (0.0 - 1.0)
    pub failure_rate: f64,

    /// Mean latency of successful requests (milliseconds)
    pub avg_ms: f64,

    /// Minimum latency of successful requests (milliseconds)
    pub min_ms: f64,

    /// Maximum latency of successful requests (milliseconds)
    pub max_ms: f64,

    /// Standard deviation of successful-request latency (milliseconds)
    pub std_dev_ms: f64,

    /// Median latency (milliseconds)
    pub p50_ms: f64,

    /// 95th-percentile latency (milliseconds)
    pub p95_ms: f64,

    /// 99th-percentile latency (milliseconds)
    pub p99_ms: f64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunStats {
    /// Compute statistics from the complete result log of one run
    pub fn from_samples(samples: &[RequestSample], elapsed: Duration) -> Self {
        let total_requests = samples.len() as u64;
        let successful_requests = samples.iter().filter(|s| s.is_successful()).count() as u64;
        let failed_requests = total_requests - successful_requests;

        let failure_rate = if total_requests == 0 {
            0.0
        } else {
            failed_requests as f64 / total_requests as f64
        };

        let mut latencies: Vec<f64> = samples
            .iter()
            .filter(|s| s.is_successful())
            .map(|s| s.duration_ms())
            .collect();
        latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        if latencies.is_empty() {
            return Self {
                total_requests,
                successful_requests,
                failed_requests,
                failure_rate,
                avg_ms: f64::INFINITY,
                min_ms: f64::INFINITY,
                max_ms: f64::INFINITY,
                std_dev_ms: 0.0,
                p50_ms: f64::INFINITY,
                p95_ms: f64::INFINITY,
                p99_ms: f64::INFINITY,
                elapsed,
            };
        }

        let count = latencies.len();
        let sum: f64 = latencies.iter().sum();
        let avg_ms = sum / count as f64;
        let min_ms = latencies[0];
        let max_ms = latencies[count - 1];

        let variance = if count > 1 {
            let sum_squared_diff: f64 = latencies.iter().map(|&x| (x - avg_ms).powi(2)).sum();
            sum_squared_diff / count as f64
        } else {
            0.0
        };
        let std_dev_ms = variance.sqrt();

        Self {
            total_requests,
            successful_requests,
            failed_requests,
            failure_rate,
            avg_ms,
            min_ms,
            max_ms,
            std_dev_ms,
            p50_ms: percentile(&latencies, 50.0),
            p95_ms: percentile(&latencies, 95.0),
            p99_ms: percentile(&latencies, 99.0),
            elapsed,
        }
    }

    /// Empty statistics for a run that issued no requests
    pub fn empty() -> Self {
        Self::from_samples(&[], Duration::ZERO)
    }

    /// Average request throughput over the run (requests per second)
    pub fn requests_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_requests as f64 / secs
        } else {
            0.0
        }
    }
}

/// Calculate a percentile over sorted values using linear interpolation
pub fn percentile(sorted_values: &[f64], pct: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::INFINITY;
    }
    if sorted_values.len() == 1 {
        return sorted_values[0];
    }

    let index = (pct / 100.0) * (sorted_values.len() as f64 - 1.0);
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_values[lower]
    } else {
        let weight = index - lower as f64;
        sorted_values[lower] * (1.0 - weight) + sorted_values[upper] * weight
    }
}
