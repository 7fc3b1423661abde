//! Batch summary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use super::RunResult;
use crate::core::RunOutcome;

/// Results of one batch run, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Unique ID of this batch.
    pub run_id: Uuid,
    /// When the batch started.
    pub started_at: DateTime<Utc>,
    /// When the last script finished.
    pub ended_at: DateTime<Utc>,
    /// One result per script.
    pub results: Vec<RunResult>,
}

impl RunSummary {
    /// Returns the number of scripts run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Counts results with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: RunOutcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Returns the number of clean successes.
    #[must_use]
    pub fn successes(&self) -> usize {
        self.count(RunOutcome::Success)
    }

    /// Returns the number of warnings.
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.count(RunOutcome::Warning)
    }

    /// Returns the number of failures.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.count(RunOutcome::Failure)
    }

    /// Iterates over results with the given outcome.
    pub fn with_outcome(&self, outcome: RunOutcome) -> impl Iterator<Item = &RunResult> {
        self.results.iter().filter(move |r| r.outcome == outcome)
    }

    /// Returns true if every script succeeded without warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_success())
    }

    /// Returns the batch wall-clock duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        (self.ended_at - self.started_at).num_milliseconds() as f64
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (heading, outcome) in [("Warnings:", RunOutcome::Warning), ("Failures:", RunOutcome::Failure)] {
            if self.count(outcome) == 0 {
                continue;
            }
            writeln!(f, "{heading}")?;
            for result in self.with_outcome(outcome) {
                writeln!(f, "{}", result.problem_report())?;
            }
        }

        writeln!(f, "Successfully completed {} scripts", self.successes())?;
        writeln!(f, "There were {} failures", self.failures())?;
        writeln!(f, "There were {} scripts that raised warnings", self.warnings())?;

        if !self.is_clean() {
            writeln!(f, "Error and warning information are available above.")?;
        }
        Ok(())
    }
}
