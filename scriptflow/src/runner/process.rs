//! Subprocess launching.
//!
//! [`ScriptLauncher`] is the seam between the orchestrator and the
//! operating system. [`ProcessLauncher`] spawns a real child process,
//! waits for it to exit and captures both output streams in full. There is
//! no timeout: a script that never exits blocks the batch.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use super::Invocation;

/// Everything captured from one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Complete stdout, decoded lossily as UTF-8.
    pub stdout: String,
    /// Complete stderr, decoded lossily as UTF-8.
    pub stderr: String,
    /// Exit code, or `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
}

/// Launches one script invocation and waits for it to finish.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScriptLauncher: Send + Sync {
    /// Runs `invocation` to completion.
    ///
    /// An `Err` means the process could not be started at all.
    async fn launch(&self, invocation: &Invocation) -> std::io::Result<ProcessOutput>;
}

/// Launcher backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

#[async_trait]
impl ScriptLauncher for ProcessLauncher {
    async fn launch(&self, invocation: &Invocation) -> std::io::Result<ProcessOutput> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
