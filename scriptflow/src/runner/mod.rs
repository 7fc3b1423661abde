//! Script execution.
//!
//! This module contains:
//! - The shared invocation contract ([`RunParameters`], [`Invocation`])
//! - The process launcher seam ([`ScriptLauncher`], [`ProcessLauncher`])
//! - Per-script results and the batch summary
//! - The sequential orchestrator ([`ScriptRunner`])

mod invocation;
mod orchestrator;
mod process;
mod result;
mod summary;

pub use invocation::{Invocation, RunParameters};
pub use orchestrator::ScriptRunner;
#[cfg(test)]
pub use process::MockScriptLauncher;
pub use process::{ProcessLauncher, ProcessOutput, ScriptLauncher};
pub use result::{ProblemReport, RunResult};
pub use summary::RunSummary;
