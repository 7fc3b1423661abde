//! The shared argument contract every script is launched with.

use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::{resolve_interpreter, RunConfig};
use crate::utils::render_command_line;

/// Parameters shared by every script in one run.
///
/// Every script receives the same flags:
/// `-d <data…> -o <output dir> -f <file type> -n <figures> -s <style>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Input data files.
    pub data: Vec<PathBuf>,
    /// Directory scripts write into. Must already exist.
    pub output_directory: PathBuf,
    /// Output file type (extension).
    pub file_type: String,
    /// Number of figures each script should produce.
    pub number_of_figures: usize,
    /// Style sheet name.
    pub stylesheet: String,
    /// Interpreter override.
    pub interpreter: Option<String>,
}

impl RunParameters {
    /// Creates parameters with the default style and no data files.
    #[must_use]
    pub fn new(
        output_directory: impl Into<PathBuf>,
        file_type: impl Into<String>,
        number_of_figures: usize,
    ) -> Self {
        Self {
            data: Vec::new(),
            output_directory: output_directory.into(),
            file_type: file_type.into(),
            number_of_figures,
            stylesheet: "default".to_string(),
            interpreter: None,
        }
    }

    /// Adds an input data file.
    #[must_use]
    pub fn with_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.data.push(path.into());
        self
    }

    /// Sets the style sheet.
    #[must_use]
    pub fn with_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.stylesheet = stylesheet.into();
        self
    }

    /// Sets the interpreter override.
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    /// Builds the argument vector shared by all scripts.
    ///
    /// Paths are passed through as raw OS strings so non-UTF-8 names reach
    /// the child unchanged.
    #[must_use]
    pub fn shared_arguments(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(self.data.len() + 9);
        args.push("-d".into());
        args.extend(self.data.iter().map(|p| p.as_os_str().to_owned()));
        args.push("-o".into());
        args.push(self.output_directory.as_os_str().to_owned());
        args.extend(
            [
                "-f".to_string(),
                self.file_type.clone(),
                "-n".to_string(),
                self.number_of_figures.to_string(),
                "-s".to_string(),
                self.stylesheet.clone(),
            ]
            .map(OsString::from),
        );
        args
    }

    /// Resolves the interpreter scripts are launched with.
    #[must_use]
    pub fn interpreter(&self) -> String {
        resolve_interpreter(self.interpreter.as_deref())
    }
}

impl From<&RunConfig> for RunParameters {
    fn from(config: &RunConfig) -> Self {
        Self {
            data: config.data.clone(),
            output_directory: config.output_directory.clone(),
            file_type: config.file_type.clone(),
            number_of_figures: config.number_of_figures,
            stylesheet: config.stylesheet.clone(),
            interpreter: config.interpreter.clone(),
        }
    }
}

/// One fully resolved process launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute (the interpreter).
    pub program: String,
    /// Script path followed by the shared arguments.
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Builds the launch for `script_path`.
    #[must_use]
    pub fn new(
        interpreter: impl Into<String>,
        script_path: &Path,
        shared_args: &[OsString],
    ) -> Self {
        let mut args = Vec::with_capacity(shared_args.len() + 1);
        args.push(script_path.as_os_str().to_owned());
        args.extend_from_slice(shared_args);

        Self {
            program: interpreter.into(),
            args,
        }
    }

    /// Returns the script path this launch runs.
    #[must_use]
    pub fn script_path(&self) -> &OsStr {
        self.args.first().map_or_else(|| OsStr::new(""), OsString::as_os_str)
    }

    /// Renders the launch as a command line that can be pasted into a shell.
    ///
    /// Non-UTF-8 bytes are shown lossily; the launch itself is unaffected.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        render_command_line(&parts)
    }
}
