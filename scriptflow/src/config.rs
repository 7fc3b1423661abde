//! Configuration types for discovery and script runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Environment variable consulted when no interpreter override is given.
pub const INTERPRETER_ENV_VAR: &str = "SCRIPTFLOW_INTERPRETER";

/// Interpreter used when neither the override nor the environment names one.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// How candidate scripts are recognised and where their frontmatter lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// File extension (without the dot) of candidate scripts.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Token that opens and closes the leading documentation block.
    #[serde(default = "default_doc_delimiter")]
    pub doc_delimiter: String,
    /// Token that opens and closes the frontmatter block inside it.
    #[serde(default = "default_frontmatter_delimiter")]
    pub frontmatter_delimiter: String,
}

fn default_extension() -> String {
    "py".to_string()
}

fn default_doc_delimiter() -> String {
    "\"\"\"".to_string()
}

fn default_frontmatter_delimiter() -> String {
    "---".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            doc_delimiter: default_doc_delimiter(),
            frontmatter_delimiter: default_frontmatter_delimiter(),
        }
    }
}

impl DiscoveryConfig {
    /// Creates a discovery configuration with Python defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the candidate file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the documentation block delimiter.
    #[must_use]
    pub fn with_doc_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.doc_delimiter = delimiter.into();
        self
    }

    /// Sets the frontmatter delimiter.
    #[must_use]
    pub fn with_frontmatter_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.frontmatter_delimiter = delimiter.into();
        self
    }

    /// Checks that no token is empty; an empty token would match every line.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("discovery.extension", &self.extension),
            ("discovery.doc_delimiter", &self.doc_delimiter),
            ("discovery.frontmatter_delimiter", &self.frontmatter_delimiter),
        ] {
            if value.is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }
        Ok(())
    }
}

/// Everything one invocation of the runner needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory scanned for scripts.
    pub scripts_directory: PathBuf,
    /// Input data files handed to every script.
    #[serde(default)]
    pub data: Vec<PathBuf>,
    /// Directory the scripts write into. Must already exist.
    pub output_directory: PathBuf,
    /// Output file type (extension).
    #[serde(default = "default_file_type")]
    pub file_type: String,
    /// Number of figures each script should produce.
    #[serde(default = "default_number_of_figures")]
    pub number_of_figures: usize,
    /// Style sheet name handed to every script.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,
    /// Interpreter override.
    #[serde(default)]
    pub interpreter: Option<String>,
    /// Where to write the aggregated metadata JSON, if anywhere.
    #[serde(default)]
    pub metadata_output: Option<PathBuf>,
    /// Discovery settings.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

fn default_file_type() -> String {
    "png".to_string()
}

fn default_number_of_figures() -> usize {
    1
}

fn default_stylesheet() -> String {
    "default".to_string()
}

impl RunConfig {
    /// Creates a configuration with defaults for everything but the two
    /// directories.
    #[must_use]
    pub fn new(scripts_directory: impl Into<PathBuf>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            scripts_directory: scripts_directory.into(),
            data: Vec::new(),
            output_directory: output_directory.into(),
            file_type: default_file_type(),
            number_of_figures: default_number_of_figures(),
            stylesheet: default_stylesheet(),
            interpreter: None,
            metadata_output: None,
            discovery: DiscoveryConfig::default(),
        }
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Adds an input data file.
    #[must_use]
    pub fn with_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.data.push(path.into());
        self
    }

    /// Sets the output file type.
    #[must_use]
    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = file_type.into();
        self
    }

    /// Sets the number of figures.
    #[must_use]
    pub fn with_number_of_figures(mut self, count: usize) -> Self {
        self.number_of_figures = count;
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

    /// Sets where aggregated metadata is written.
    #[must_use]
    pub fn with_metadata_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.metadata_output = Some(path.into());
        self
    }

    /// Sets the discovery settings.
    #[must_use]
    pub fn with_discovery(mut self, discovery: DiscoveryConfig) -> Self {
        self.discovery = discovery;
        self
    }

    /// Checks the values that scripts rely on before anything runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.discovery.validate()?;

        if !self.output_directory.is_dir() {
            return Err(ConfigError::invalid(
                "output_directory",
                format!("{} does not exist or is not a directory", self.output_directory.display()),
            ));
        }

        if self.file_type.is_empty() || self.file_type.starts_with('.') {
            return Err(ConfigError::invalid(
                "file_type",
                "must be a bare extension such as `png`",
            ));
        }

        if self.number_of_figures == 0 {
            return Err(ConfigError::invalid("number_of_figures", "must be at least 1"));
        }

        Ok(())
    }

    /// Resolves the interpreter: override, then environment, then default.
    #[must_use]
    pub fn resolve_interpreter(&self) -> String {
        resolve_interpreter(self.interpreter.as_deref())
    }
}

/// Picks the interpreter to launch scripts with.
#[must_use]
pub fn resolve_interpreter(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(INTERPRETER_ENV_VAR).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.extension, "py");
        assert_eq!(config.doc_delimiter, "\"\"\"");
        assert_eq!(config.frontmatter_delimiter, "---");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_discovery_rejects_empty_token() {
        let config = DiscoveryConfig::new().with_frontmatter_delimiter("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_run_config_from_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(
            &path,
            r#"{"scripts_directory": "scripts", "output_directory": "out", "data": ["a.csv"]}"#,
        )
        .unwrap();

        let config = RunConfig::from_file(&path).unwrap();
        assert_eq!(config.scripts_directory, PathBuf::from("scripts"));
        assert_eq!(config.data, vec![PathBuf::from("a.csv")]);
        assert_eq!(config.file_type, "png");
        assert_eq!(config.number_of_figures, 1);
        assert_eq!(config.stylesheet, "default");
        assert!(config.interpreter.is_none());
        assert_eq!(config.discovery, DiscoveryConfig::default());
    }

    #[test]
    fn test_run_config_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            RunConfig::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{").unwrap();
        assert!(matches!(
            RunConfig::from_file(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_validate_requires_existing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let ok = RunConfig::new("scripts", dir.path());
        assert!(ok.validate().is_ok());

        let missing = RunConfig::new("scripts", dir.path().join("nope"));
        let err = missing.validate().unwrap_err();
        assert!(err.to_string().contains("output_directory"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();

        let zero = RunConfig::new("s", dir.path()).with_number_of_figures(0);
        assert!(zero.validate().is_err());

        let dotted = RunConfig::new("s", dir.path()).with_file_type(".png");
        assert!(dotted.validate().is_err());
    }

    #[test]
    fn test_explicit_interpreter_wins() {
        let config = RunConfig::new("s", "o").with_interpreter("/opt/python/bin/python3.12");
        assert_eq!(config.resolve_interpreter(), "/opt/python/bin/python3.12");
        assert_eq!(resolve_interpreter(Some("sh")), "sh");
    }

    #[test]
    fn test_interpreter_environment_then_default() {
        let previous = std::env::var_os(INTERPRETER_ENV_VAR);

        std::env::set_var(INTERPRETER_ENV_VAR, "/usr/bin/pypy3");
        assert_eq!(resolve_interpreter(None), "/usr/bin/pypy3");
        assert_eq!(resolve_interpreter(Some("sh")), "sh");

        std::env::set_var(INTERPRETER_ENV_VAR, "");
        assert_eq!(resolve_interpreter(None), DEFAULT_INTERPRETER);

        std::env::remove_var(INTERPRETER_ENV_VAR);
        assert_eq!(resolve_interpreter(None), "python3");

        if let Some(value) = previous {
            std::env::set_var(INTERPRETER_ENV_VAR, value);
        }
    }
}
