//! Run result data model

use crate::models::sample::RequestSample;
use crate::models::threshold::ThresholdOutcome;
use crate::stats::RunStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a load-test run
///
/// `Configured -> Running -> {Passed, Failed}`; the terminal states are
/// final, there is no retry or resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Configuration validated, run not yet started
    Configured,
    /// Virtual users are issuing requests
    Running,
    /// Run completed and every threshold held
    Passed,
    /// Run completed with at least one violated threshold
    Failed,
}

impl RunStatus {
    /// Whether this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Passed | RunStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Configured => "CONFIGURED",
            RunStatus::Running => "RUNNING",
            RunStatus::Passed => "PASSED",
            RunStatus::Failed => "FAILED",
        }
    }
}

/// Aggregated view over all samples of one completed run
///
/// Derived once after the run finishes and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Unique identifier for this run
    pub run_id: Uuid,

    /// Terminal status (Passed or Failed)
    pub status: RunStatus,

    /// Computed aggregate statistics
    pub stats: RunStats,

    /// Per-threshold evaluation results, in configured order
    pub threshold_outcomes: Vec<ThresholdOutcome>,

    /// The full result log, one entry per issued request
    pub samples: Vec<RequestSample>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run completed
    pub completed_at: DateTime<Utc>,
}

impl RunResult {
    /// Assemble the result of a completed run
    ///
    /// The run passes only if every threshold outcome passed.
    pub fn new(
        stats: RunStats,
        threshold_outcomes: Vec<ThresholdOutcome>,
        samples: Vec<RequestSample>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let status = if threshold_outcomes.iter().all(|o| o.passed) {
            RunStatus::Passed
        } else {
            RunStatus::Failed
        };

        Self {
            run_id: Uuid::new_v4(),
            status,
            stats,
            threshold_outcomes,
            samples,
            started_at,
            completed_at: Utc::now(),
        }
    }

    /// Whether every threshold held
    pub fn passed(&self) -> bool {
        self.status == RunStatus::Passed
    }

    /// Thresholds that were violated, in configured order
    pub fn violated_thresholds(&self) -> Vec<&ThresholdOutcome> {
        self.threshold_outcomes.iter().filter(|o| !o.passed).collect()
    }
}
