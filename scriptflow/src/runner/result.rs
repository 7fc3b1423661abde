//! Per-script run results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::ProcessOutput;
use crate::core::RunOutcome;

/// The captured outcome of executing one script once.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Position of the script in the catalog.
    pub index: usize,
    /// Script name from its frontmatter.
    pub script_name: String,
    /// Script source path.
    pub path: PathBuf,
    /// Classified outcome.
    pub outcome: RunOutcome,
    /// Exit code, `None` if killed by a signal or never started.
    pub exit_code: Option<i32>,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
    /// When the script was launched.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: f64,
    /// Command line that reproduces this exact invocation.
    pub command_line: String,
}

impl RunResult {
    /// Builds and classifies a result from captured process output.
    #[must_use]
    pub fn from_output(
        index: usize,
        script_name: impl Into<String>,
        path: impl Into<PathBuf>,
        output: ProcessOutput,
        started_at: DateTime<Utc>,
        duration_ms: f64,
        command_line: impl Into<String>,
    ) -> Self {
        let outcome = RunOutcome::classify(output.exit_code, &output.stdout, &output.stderr);

        Self {
            index,
            script_name: script_name.into(),
            path: path.into(),
            outcome,
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
            started_at,
            duration_ms,
            command_line: command_line.into(),
        }
    }

    /// Returns the elapsed wall-clock time.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.duration_ms.max(0.0) / 1000.0)
    }

    /// Returns a displayable block describing a warning or failure.
    #[must_use]
    pub fn problem_report(&self) -> ProblemReport<'_> {
        ProblemReport(self)
    }
}

/// Display adapter rendering a run result as a debugging block: path, exit
/// status, captured streams and the re-run command.
#[derive(Debug)]
pub struct ProblemReport<'a>(&'a RunResult);

impl fmt::Display for ProblemReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let status = result
            .exit_code
            .map_or_else(|| "no exit status".to_string(), |code| format!("exit status {code}"));

        writeln!(
            f,
            "{} ({}, {:.2} s)",
            result.path.display(),
            status,
            result.duration_ms / 1000.0
        )?;
        if !result.stdout.is_empty() {
            writeln!(f, "Output:\n{}", result.stdout.trim_end())?;
        }
        if !result.stderr.is_empty() {
            writeln!(f, "Errors:\n{}", result.stderr.trim_end())?;
        }
        writeln!(f, "Re-run with:\n{}", result.command_line)
    }
}
