//! Script directory fixtures.

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::DiscoveryConfig;

/// A temporary directory that scripts can be written into.
#[derive(Debug)]
pub struct ScriptDir {
    dir: TempDir,
}

impl ScriptDir {
    /// Creates an empty temporary directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `name` inside the directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("write script");
        path
    }

    /// Creates a subdirectory and returns its path.
    pub fn subdir(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::create_dir_all(&path).expect("create subdir");
        path
    }
}

fn frontmatter_json(name: &str, outputs: &[(&str, bool)], capture_stdout: bool) -> String {
    let outputs: Vec<_> = outputs
        .iter()
        .map(|(filename, multi)| {
            json!({
                "filename": filename,
                "title": format!("{filename} title"),
                "description": format!("What {filename} shows."),
                "multi_output": multi,
            })
        })
        .collect();

    let value = json!({
        "name": name,
        "created_by": "Test Author",
        "contact_email": "author@example.org",
        "capture_stdout": capture_stdout,
        "outputs": outputs,
    });
    serde_json::to_string_pretty(&value).expect("serialize frontmatter")
}

/// Renders a Python script with a valid frontmatter header.
pub fn python_script(name: &str, outputs: &[(&str, bool)]) -> String {
    format!(
        "\"\"\"\n---\n{}\n---\nPlots things.\n\"\"\"\nimport sys\n",
        frontmatter_json(name, outputs, false)
    )
}

/// Discovery settings for [`shell_script`] files.
pub fn shell_config() -> DiscoveryConfig {
    DiscoveryConfig::new()
        .with_extension("sh")
        .with_doc_delimiter("'")
}

/// Renders a POSIX shell script whose header is a `: '...'` no-op block.
///
/// `body` runs after the header with the shared flags in `$@`.
pub fn shell_script(name: &str, outputs: &[(&str, bool)], body: &str, capture_stdout: bool) -> String {
    format!(
        ": '\n---\n{}\n---\n'\n{body}\n",
        frontmatter_json(name, outputs, capture_stdout)
    )
}
