//! Load driver: task-per-virtual-user execution engine
//!
//! The driver owns one run: it spawns a tokio task per virtual user, each
//! looping over the request executor with a think-time pause between
//! iterations, collects every [`RequestSample`] through an mpsc channel,
//! and evaluates the configured thresholds once all workers have finished.

use crate::client::RequestExecutor;
use crate::error::{AppError, Result};
use crate::models::config::RunConfig;
use crate::models::report::{RunResult, RunStatus};
use crate::models::sample::RequestSample;
use crate::stats::RunStats;
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Drives one load-test run to completion
///
/// A driver is single-use: `run` consumes it, matching the
/// `Configured -> Running -> {Passed, Failed}` lifecycle with no retry or
/// resume.
#[derive(Debug)]
pub struct LoadDriver {
    config: RunConfig,
    status: RunStatus,
}

impl LoadDriver {
    /// Create a driver from a validated configuration
    ///
    /// Returns a `ConfigurationError` for invalid settings (zero virtual
    /// users, zero duration) before any request is issued.
    pub fn new(config: RunConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            status: RunStatus::Configured,
        })
    }

    /// Current lifecycle state
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// The configuration this driver was built from
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Execute the run: spawn workers, collect samples, evaluate thresholds
    ///
    /// Individual request failures are recorded as failed samples and never
    /// abort the run. Requests in flight when the duration elapses are
    /// allowed to complete and their samples are still recorded.
    pub async fn run<E: RequestExecutor>(mut self, executor: Arc<E>) -> Result<RunResult> {
        self.status = RunStatus::Running;

        let started_at = Utc::now();
        let start = Instant::now();
        let deadline = start + self.config.duration;

        let (sample_tx, mut sample_rx) = mpsc::unbounded_channel::<RequestSample>();

        // The collector side of the channel is the single concurrency-safe
        // append point for the run's result log.
        let collector = tokio::spawn(async move {
            let mut samples = Vec::new();
            while let Some(sample) = sample_rx.recv().await {
                samples.push(sample);
            }
            samples
        });

        let workers: Vec<_> = (0..self.config.virtual_users)
            .map(|vu| {
                tokio::spawn(virtual_user_loop(
                    vu,
                    Arc::clone(&executor),
                    deadline,
                    self.config.think_time,
                    sample_tx.clone(),
                ))
            })
            .collect();

        // Workers hold the remaining senders; the collector finishes once
        // the last of them exits.
        drop(sample_tx);

        for joined in join_all(workers).await {
            joined.map_err(|e| AppError::internal(format!("Worker task panicked: {}", e)))?;
        }

        let samples = collector
            .await
            .map_err(|e| AppError::internal(format!("Sample collector failed: {}", e)))?;

        let stats = RunStats::from_samples(&samples, start.elapsed());
        let outcomes = self
            .config
            .thresholds
            .iter()
            .map(|t| t.evaluate(&stats))
            .collect();

        let result = RunResult::new(stats, outcomes, samples, started_at);
        self.status = result.status;
        Ok(result)
    }
}

/// One virtual user: issue requests until the deadline, pausing think-time
/// between iterations
///
/// The deadline is checked before each request, so a request in flight when
/// it passes completes normally and is recorded. The think-time pause is
/// clamped to the deadline so workers end promptly.
async fn virtual_user_loop<E: RequestExecutor>(
    vu: u32,
    executor: Arc<E>,
    deadline: Instant,
    think_time: Duration,
    sample_tx: mpsc::UnboundedSender<RequestSample>,
) {
    loop {
        if Instant::now() >= deadline {
            break;
        }

        let started_at = Utc::now();
        let request_start = Instant::now();
        let outcome = executor.execute().await;
        let duration = request_start.elapsed();

        let sample = RequestSample::from_outcome(vu, started_at, duration, outcome);
        if sample_tx.send(sample).is_err() {
            break;
        }

        let now = Instant::now();
        if now >= deadline {
            break;
        }
        tokio::time::sleep_until(deadline.min(now + think_time)).await;
    }
}
