//! Run outcome classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Substring that turns an otherwise clean run into a warning.
pub const WARNING_MARKER: &str = "Warn";

/// The classified outcome of running one script once.
///
/// The three outcomes are mutually exclusive: a warning is neither a
/// success nor a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Exited with status zero and printed no warning marker.
    Success,
    /// Exited with status zero but printed the warning marker.
    Warning,
    /// Exited with a non-zero status, was killed, or never started.
    Failure,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

impl RunOutcome {
    /// Classifies a finished process.
    ///
    /// `exit_code` is `None` when the process was killed by a signal or
    /// could not be started; both count as failures.
    #[must_use]
    pub fn classify(exit_code: Option<i32>, stdout: &str, stderr: &str) -> Self {
        match exit_code {
            Some(0) if stdout.contains(WARNING_MARKER) || stderr.contains(WARNING_MARKER) => {
                Self::Warning
            }
            Some(0) => Self::Success,
            _ => Self::Failure,
        }
    }

    /// Returns true for a clean success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns true if the run needs a human to look at it.
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Warning | Self::Failure)
    }

    /// Returns true if the run failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }
}
