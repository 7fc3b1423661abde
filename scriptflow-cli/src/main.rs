//! `scriptflow <config.json>`: discover, run and catalogue analysis scripts.
//!
//! Exits with status 0 when every script succeeded cleanly, 1 when any
//! script failed or raised a warning, and 2 on a configuration or
//! discovery error.

use anyhow::Context;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use scriptflow::aggregate::MetadataReport;
use scriptflow::config::RunConfig;
use scriptflow::events::LoggingEventSink;
use scriptflow::observability::{init_logging, LogFormat};
use scriptflow::runner::{RunParameters, ScriptRunner};

const LOG_FORMAT_ENV_VAR: &str = "SCRIPTFLOW_LOG_FORMAT";

const EXIT_CLEAN: u8 = 0;
const EXIT_PROBLEMS: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let format = std::env::var(LOG_FORMAT_ENV_VAR).unwrap_or_default();
    init_logging(LogFormat::from_name(&format));

    let Some(config_path) = std::env::args_os().nth(1) else {
        eprintln!("usage: scriptflow <config.json>");
        return ExitCode::from(EXIT_ERROR);
    };

    ExitCode::from(execute(Path::new(&config_path)).await)
}

/// Runs the batch configured in `config_path` and maps the result to an
/// exit status.
async fn execute(config_path: &Path) -> u8 {
    match run(config_path).await {
        Ok(true) => EXIT_CLEAN,
        Ok(false) => EXIT_PROBLEMS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "scriptflow aborted");
            eprintln!("error: {err:#}");
            EXIT_ERROR
        }
    }
}

/// Runs the configured batch. Returns whether it was clean.
async fn run(config_path: &Path) -> anyhow::Result<bool> {
    let config = RunConfig::from_file(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    config.validate().context("invalid configuration")?;

    let mut runner = ScriptRunner::discover(&config.scripts_directory, &config.discovery)
        .context("script discovery failed")?
        .with_event_sink(Arc::new(LoggingEventSink::debug()));

    let summary = runner.run(&RunParameters::from(&config)).await;
    print!("{summary}");

    if !runner.captured_output().is_empty() {
        println!("Captured output:\n{}", runner.captured_output().trim_end());
    }

    if let Some(path) = &config.metadata_output {
        let report = MetadataReport::build(
            runner.catalog().scripts(),
            &config.file_type,
            config.number_of_figures,
        );
        for missing in report.missing_in(&config.output_directory) {
            tracing::warn!(file = %missing.display(), "Promised output was not produced");
        }
        report
            .present_in(&config.output_directory)
            .write_json(path)
            .with_context(|| format!("writing metadata to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Wrote output metadata");
    }

    Ok(summary.is_clean())
}
