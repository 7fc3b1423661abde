//! Run events for observability.
//!
//! The orchestrator reports progress as [`RunEvent`]s through an
//! [`EventSink`]. Sinks never influence the run; they only observe it.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

use crate::core::RunOutcome;

/// Something that happened during a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// The batch is about to start.
    RunStarted {
        /// Batch ID.
        run_id: Uuid,
        /// Number of scripts that will run.
        scripts: usize,
    },
    /// A script is about to be launched.
    ScriptStarted {
        /// Batch ID.
        run_id: Uuid,
        /// Catalog index.
        index: usize,
        /// Script name.
        name: String,
        /// Script path.
        path: PathBuf,
    },
    /// A script finished and was classified.
    ScriptCompleted {
        /// Batch ID.
        run_id: Uuid,
        /// Catalog index.
        index: usize,
        /// Script name.
        name: String,
        /// Classified outcome.
        outcome: RunOutcome,
        /// Exit code, if any.
        exit_code: Option<i32>,
        /// Wall-clock duration in milliseconds.
        duration_ms: f64,
    },
    /// Every script has been attempted.
    RunCompleted {
        /// Batch ID.
        run_id: Uuid,
        /// Clean successes.
        successes: usize,
        /// Warnings.
        warnings: usize,
        /// Failures.
        failures: usize,
    },
}

impl RunEvent {
    /// Returns the dotted event type, e.g. `script.completed`.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run.started",
            Self::ScriptStarted { .. } => "script.started",
            Self::ScriptCompleted { .. } => "script.completed",
            Self::RunCompleted { .. } => "run.completed",
        }
    }

    /// Returns the batch ID the event belongs to.
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        match self {
            Self::RunStarted { run_id, .. }
            | Self::ScriptStarted { run_id, .. }
            | Self::ScriptCompleted { run_id, .. }
            | Self::RunCompleted { run_id, .. } => *run_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        let run_id = Uuid::new_v4();
        let event = RunEvent::RunCompleted {
            run_id,
            successes: 1,
            warnings: 0,
            failures: 2,
        };
        assert_eq!(event.event_type(), "run.completed");
        assert_eq!(event.run_id(), run_id);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = RunEvent::ScriptCompleted {
            run_id: Uuid::nil(),
            index: 1,
            name: "plot.py".to_string(),
            outcome: RunOutcome::Warning,
            exit_code: Some(0),
            duration_ms: 12.5,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "script_completed");
        assert_eq!(json["outcome"], "warning");
        assert_eq!(json["exit_code"], 0);
    }
}
