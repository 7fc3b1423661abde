//! Sequential script orchestration.

use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    Invocation, ProcessLauncher, ProcessOutput, RunParameters, RunResult, RunSummary,
    ScriptLauncher,
};
use crate::config::DiscoveryConfig;
use crate::core::{OutputMetadata, RunOutcome, ScriptDescriptor};
use crate::discovery::ScriptCatalog;
use crate::errors::DiscoveryError;
use crate::events::{EventSink, NoOpEventSink, RunEvent};
use crate::observability::SpanTimer;
use crate::utils::{format_iso8601, now_utc};

/// Runs every script in a catalog once, in catalog order, and classifies
/// the results.
///
/// Scripts run one at a time; a failing script never stops the batch.
/// Standard output of scripts that set `capture_stdout` is appended to a
/// buffer owned by the runner (see [`ScriptRunner::captured_output`]).
pub struct ScriptRunner {
    catalog: ScriptCatalog,
    launcher: Arc<dyn ScriptLauncher>,
    event_sink: Arc<dyn EventSink>,
    captured_output: String,
}

impl std::fmt::Debug for ScriptRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRunner")
            .field("catalog", &self.catalog)
            .field("captured_output_len", &self.captured_output.len())
            .finish_non_exhaustive()
    }
}

impl ScriptRunner {
    /// Creates a runner over an existing catalog.
    #[must_use]
    pub fn new(catalog: ScriptCatalog) -> Self {
        Self {
            catalog,
            launcher: Arc::new(ProcessLauncher),
            event_sink: Arc::new(NoOpEventSink),
            captured_output: String::new(),
        }
    }

    /// Discovers the scripts in `directory` and creates a runner over them.
    pub fn discover(
        directory: impl AsRef<Path>,
        config: &DiscoveryConfig,
    ) -> Result<Self, DiscoveryError> {
        Ok(Self::new(ScriptCatalog::discover(directory, config)?))
    }

    /// Replaces the process launcher.
    #[must_use]
    pub fn with_launcher(mut self, launcher: Arc<dyn ScriptLauncher>) -> Self {
        self.launcher = launcher;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    /// Returns the catalog being run.
    #[must_use]
    pub fn catalog(&self) -> &ScriptCatalog {
        &self.catalog
    }

    /// Returns the standard output accumulated from capturing scripts.
    #[must_use]
    pub fn captured_output(&self) -> &str {
        &self.captured_output
    }

    /// Returns the promised output metadata of every script.
    #[must_use]
    pub fn get_metadata(&self, file_type: &str, total_count: usize) -> Vec<OutputMetadata> {
        self.catalog.get_metadata(file_type, total_count)
    }

    /// Runs every script once and returns the classified results.
    pub async fn run(&mut self, params: &RunParameters) -> RunSummary {
        let run_id = Uuid::new_v4();
        let started_at = now_utc();
        let shared_args = params.shared_arguments();
        let interpreter = params.interpreter();

        info!(
            %run_id,
            scripts = self.catalog.len(),
            interpreter = %interpreter,
            started_at = %format_iso8601(&started_at),
            "Starting script run"
        );
        self.event_sink
            .emit(&RunEvent::RunStarted {
                run_id,
                scripts: self.catalog.len(),
            })
            .await;

        let mut results = Vec::with_capacity(self.catalog.len());
        for index in 0..self.catalog.len() {
            let script = &self.catalog.scripts()[index];
            let path = &self.catalog.paths()[index];
            let invocation = Invocation::new(interpreter.as_str(), path, &shared_args);

            let result = self
                .run_one(run_id, index, script, path, invocation)
                .await;

            if script.captures_stdout() && !result.outcome.is_failure() {
                self.captured_output.push_str(&result.stdout);
            }
            results.push(result);
        }

        let summary = RunSummary {
            run_id,
            started_at,
            ended_at: now_utc(),
            results,
        };

        info!(
            %run_id,
            successes = summary.successes(),
            warnings = summary.warnings(),
            failures = summary.failures(),
            duration_ms = summary.duration_ms(),
            "Script run complete"
        );
        self.event_sink
            .emit(&RunEvent::RunCompleted {
                run_id,
                successes: summary.successes(),
                warnings: summary.warnings(),
                failures: summary.failures(),
            })
            .await;

        summary
    }

    async fn run_one(
        &self,
        run_id: Uuid,
        index: usize,
        script: &ScriptDescriptor,
        path: &Path,
        invocation: Invocation,
    ) -> RunResult {
        self.event_sink
            .emit(&RunEvent::ScriptStarted {
                run_id,
                index,
                name: script.name().to_string(),
                path: path.to_path_buf(),
            })
            .await;

        let command_line = invocation.command_line();
        info!(script = script.name(), path = %path.display(), "Running script");
        let timer = SpanTimer::start(script.name());
        let started_at = timer.started_at();

        let output = match self.launcher.launch(&invocation).await {
            Ok(output) => output,
            Err(err) => {
                error!(
                    script = script.name(),
                    program = %invocation.program,
                    error = %err,
                    "Failed to launch script"
                );
                ProcessOutput {
                    stdout: String::new(),
                    stderr: format!("failed to launch {}: {err}", invocation.program),
                    exit_code: None,
                }
            }
        };
        let duration_ms = timer.finish();

        let result = RunResult::from_output(
            index,
            script.name(),
            path,
            output,
            started_at,
            duration_ms,
            command_line,
        );

        match result.outcome {
            RunOutcome::Success => info!(
                script = script.name(),
                duration_ms,
                "Script succeeded"
            ),
            RunOutcome::Warning => warn!(
                script = script.name(),
                duration_ms,
                "Script succeeded with warnings"
            ),
            RunOutcome::Failure => warn!(
                script = script.name(),
                exit_code = ?result.exit_code,
                duration_ms,
                "Script failed"
            ),
        }

        self.event_sink
            .emit(&RunEvent::ScriptCompleted {
                run_id,
                index,
                name: script.name().to_string(),
                outcome: result.outcome,
                exit_code: result.exit_code,
                duration_ms,
            })
            .await;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OutputDescriptor;
    use crate::events::CollectingEventSink;
    use crate::runner::MockScriptLauncher;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn catalog(names: &[(&str, bool)]) -> ScriptCatalog {
        ScriptCatalog::from_entries(names.iter().map(|(name, capture)| {
            (
                ScriptDescriptor::new(*name)
                    .with_capture_stdout(*capture)
                    .with_output(OutputDescriptor::new(*name, *name, "", false).unwrap()),
                PathBuf::from(format!("scripts/{name}.py")),
            )
        }))
    }

    fn output(exit_code: i32, stdout: &str, stderr: &str) -> ProcessOutput {
        ProcessOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code: Some(exit_code),
        }
    }

    fn params() -> RunParameters {
        RunParameters::new("out", "png", 1)
            .with_data("data.csv")
            .with_interpreter("python3")
    }

    /// Launcher that answers by script path.
    fn scripted_launcher() -> MockScriptLauncher {
        let mut launcher = MockScriptLauncher::new();
        launcher.expect_launch().returning(|invocation| {
            let script = invocation.script_path().to_string_lossy();
            Ok(match script.as_ref() {
                "scripts/quiet.py" => output(0, "", ""),
                "scripts/noisy.py" => output(0, "Warning: x\n", ""),
                "scripts/broken.py" => output(1, "", "Traceback\n"),
                "scripts/stats.py" => output(0, "mean=4.2\n", ""),
                other => panic!("unexpected script {other}"),
            })
        });
        launcher
    }

    #[tokio::test]
    async fn test_classifies_each_script() {
        let mut runner = ScriptRunner::new(catalog(&[
            ("quiet", false),
            ("noisy", false),
            ("broken", false),
        ]))
        .with_launcher(Arc::new(scripted_launcher()));

        let summary = runner.run(&params()).await;

        let outcomes: Vec<RunOutcome> = summary.results.iter().map(|r| r.outcome).collect();
        assert_eq!(
            outcomes,
            vec![RunOutcome::Success, RunOutcome::Warning, RunOutcome::Failure]
        );
        assert_eq!(summary.successes() + summary.warnings() + summary.failures(), 3);
    }

    #[tokio::test]
    async fn test_every_script_attempted_once_in_order() {
        let mut launcher = MockScriptLauncher::new();
        let mut sequence = mockall::Sequence::new();
        for script in ["scripts/broken.py", "scripts/quiet.py"] {
            launcher
                .expect_launch()
                .withf(move |invocation| invocation.script_path() == script)
                .times(1)
                .in_sequence(&mut sequence)
                .returning(|invocation| {
                    Ok(if invocation.script_path() == "scripts/broken.py" {
                        output(2, "", "")
                    } else {
                        output(0, "", "")
                    })
                });
        }

        let mut runner = ScriptRunner::new(catalog(&[("broken", false), ("quiet", false)]))
            .with_launcher(Arc::new(launcher));
        let summary = runner.run(&params()).await;

        assert_eq!(summary.failures(), 1);
        assert_eq!(summary.successes(), 1);
    }

    #[tokio::test]
    async fn test_invocation_uses_shared_contract() {
        let mut launcher = MockScriptLauncher::new();
        launcher
            .expect_launch()
            .withf(|invocation| {
                invocation.program == "python3"
                    && invocation.args
                        == [
                            "scripts/quiet.py", "-d", "data.csv", "-o", "out", "-f", "png", "-n",
                            "1", "-s", "default",
                        ]
            })
            .times(1)
            .returning(|_| Ok(output(0, "", "")));

        let mut runner =
            ScriptRunner::new(catalog(&[("quiet", false)])).with_launcher(Arc::new(launcher));
        let summary = runner.run(&params()).await;

        assert_eq!(
            summary.results[0].command_line,
            "python3 scripts/quiet.py -d data.csv -o out -f png -n 1 -s default"
        );
    }

    #[tokio::test]
    async fn test_captured_output_skips_failures_and_non_capturing() {
        let mut runner = ScriptRunner::new(catalog(&[
            ("stats", true),
            ("broken", true),
            ("noisy", true),
            ("quiet", false),
        ]))
        .with_launcher(Arc::new(scripted_launcher()));

        runner.run(&params()).await;

        assert_eq!(runner.captured_output(), "mean=4.2\nWarning: x\n");
    }

    #[tokio::test]
    async fn test_launch_error_is_failure() {
        let mut launcher = MockScriptLauncher::new();
        launcher.expect_launch().returning(|_| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"))
        });

        let mut runner =
            ScriptRunner::new(catalog(&[("quiet", false), ("noisy", false)]))
                .with_launcher(Arc::new(launcher));
        let summary = runner.run(&params()).await;

        assert_eq!(summary.failures(), 2);
        assert!(summary.results[0].exit_code.is_none());
        assert!(summary.results[0].stderr.contains("failed to launch python3"));
    }

    #[tokio::test]
    async fn test_events_emitted_in_order() {
        let sink = Arc::new(CollectingEventSink::new());
        let mut runner = ScriptRunner::new(catalog(&[("quiet", false), ("broken", false)]))
            .with_launcher(Arc::new(scripted_launcher()))
            .with_event_sink(sink.clone());

        let summary = runner.run(&params()).await;

        assert_eq!(
            sink.event_types(),
            vec![
                "run.started",
                "script.started",
                "script.completed",
                "script.started",
                "script.completed",
                "run.completed",
            ]
        );
        assert!(sink.events().iter().all(|e| e.run_id() == summary.run_id));
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let mut runner = ScriptRunner::new(ScriptCatalog::default())
            .with_launcher(Arc::new(MockScriptLauncher::new()));
        let summary = runner.run(&params()).await;

        assert_eq!(summary.total(), 0);
        assert!(summary.is_clean());
    }
}
