//! Pass/fail threshold predicates over aggregate run metrics

use crate::error::AppError;
use crate::stats::RunStats;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregate metric a threshold can be evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Median request latency (milliseconds)
    P50,
    /// 95th-percentile request latency (milliseconds)
    P95,
    /// 99th-percentile request latency (milliseconds)
    P99,
    /// Mean request latency (milliseconds)
    AvgLatency,
    /// Fraction of failed requests (0.0 - 1.0)
    FailRate,
}

impl Metric {
    /// Metric name as it appears in threshold expressions and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::P50 => "p50",
            Metric::P95 => "p95",
            Metric::P99 => "p99",
            Metric::AvgLatency => "avg",
            Metric::FailRate => "fail_rate",
        }
    }

    /// Extract the observed value for this metric from run statistics
    pub fn observed(&self, stats: &RunStats) -> f64 {
        match self {
            Metric::P50 => stats.p50_ms,
            Metric::P95 => stats.p95_ms,
            Metric::P99 => stats.p99_ms,
            Metric::AvgLatency => stats.avg_ms,
            Metric::FailRate => stats.failure_rate,
        }
    }

    /// Whether this metric is a latency measured in milliseconds
    pub fn is_latency(&self) -> bool {
        !matches!(self, Metric::FailRate)
    }
}

impl FromStr for Metric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "p50" | "median" => Ok(Metric::P50),
            "p95" => Ok(Metric::P95),
            "p99" => Ok(Metric::P99),
            "avg" => Ok(Metric::AvgLatency),
            "fail_rate" | "rate" => Ok(Metric::FailRate),
            other => Err(AppError::parse(format!(
                "Unknown threshold metric '{}' (expected p50, p95, p99, avg, or fail_rate)",
                other
            ))),
        }
    }
}

/// Comparison operator in a threshold expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl Comparison {
    /// Operator symbol for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::LessThan => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::GreaterThan => ">",
            Comparison::GreaterOrEqual => ">=",
        }
    }

    /// Apply the comparison to an observed value
    pub fn holds(&self, observed: f64, limit: f64) -> bool {
        match self {
            Comparison::LessThan => observed < limit,
            Comparison::LessOrEqual => observed <= limit,
            Comparison::GreaterThan => observed > limit,
            Comparison::GreaterOrEqual => observed >= limit,
        }
    }
}

/// A single pass/fail predicate over an aggregate metric
///
/// Parsed from the compact form used by the original test scripts, e.g.
/// `p95<1000` (95th-percentile latency below 1000 ms) or `fail_rate<0.1`
/// (less than 10% failed requests).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub metric: Metric,
    pub comparison: Comparison,
    pub value: f64,
}

impl Threshold {
    pub fn new(metric: Metric, comparison: Comparison, value: f64) -> Self {
        Self {
            metric,
            comparison,
            value,
        }
    }

    /// Evaluate this threshold against computed run statistics
    pub fn evaluate(&self, stats: &RunStats) -> ThresholdOutcome {
        let observed = self.metric.observed(stats);
        ThresholdOutcome {
            threshold: *self,
            observed,
            passed: self.comparison.holds(observed, self.value),
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.metric.as_str(),
            self.comparison.as_str(),
            self.value
        )
    }
}

impl FromStr for Threshold {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expr = s.trim();

        // Two-character operators must be checked before single-character ones
        let (op_index, op_len, comparison) = ["<=", ">=", "<", ">"]
            .iter()
            .find_map(|op| expr.find(*op).map(|i| (i, op.len(), *op)))
            .map(|(i, len, op)| {
                let comparison = match op {
                    "<=" => Comparison::LessOrEqual,
                    ">=" => Comparison::GreaterOrEqual,
                    "<" => Comparison::LessThan,
                    _ => Comparison::GreaterThan,
                };
                (i, len, comparison)
            })
            .ok_or_else(|| {
                AppError::parse(format!(
                    "Invalid threshold '{}': expected <metric><op><value>, e.g. p95<1000",
                    expr
                ))
            })?;

        let metric: Metric = expr[..op_index].trim().parse()?;
        let value_str = expr[op_index + op_len..].trim();
        let value: f64 = value_str.parse().map_err(|_| {
            AppError::parse(format!(
                "Invalid threshold value '{}' in '{}'",
                value_str, expr
            ))
        })?;

        if !value.is_finite() || value < 0.0 {
            return Err(AppError::parse(format!(
                "Threshold value must be a non-negative number, got '{}'",
                value_str
            )));
        }

        Ok(Threshold::new(metric, comparison, value))
    }
}

/// Result of evaluating one threshold against a completed run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOutcome {
    /// The threshold that was evaluated
    pub threshold: Threshold,
    /// Observed metric value for the run
    pub observed: f64,
    /// Whether the predicate held
    pub passed: bool,
}

impl ThresholdOutcome {
    /// Format the observed value in the metric's natural unit
    pub fn format_observed(&self) -> String {
        if self.observed.is_infinite() {
            return "inf".to_string();
        }
        if self.threshold.metric.is_latency() {
            format!("{:.1}ms", self.observed)
        } else {
            format!("{:.3}", self.observed)
        }
    }
}

/// Parse a comma-separated threshold list (environment variable form)
pub fn parse_threshold_list(raw: &str) -> crate::error::Result<Vec<Threshold>> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(Threshold::from_str)
        .collect()
}
