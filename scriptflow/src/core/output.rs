//! Output descriptors: the artifacts a script promises to produce.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::{validate_filename_stem, InvalidNameError};

/// Describes one named artifact, or a numbered family of artifacts, that a
/// script declares in its frontmatter.
///
/// `OutputDescriptor` is immutable once created. The filename stem is
/// validated by [`OutputDescriptor::new`], so path expansion never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDescriptor {
    filename: String,
    title: String,
    description: String,
    multi_output: bool,
}

impl OutputDescriptor {
    /// Creates a new output descriptor.
    pub fn new(
        filename: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        multi_output: bool,
    ) -> Result<Self, InvalidNameError> {
        let filename = filename.into();
        validate_filename_stem(&filename)?;

        Ok(Self {
            filename,
            title: title.into(),
            description: description.into(),
            multi_output,
        })
    }

    /// Returns the filename stem (no extension).
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the human-readable title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns true if this descriptor yields a numbered family of artifacts.
    #[must_use]
    pub fn is_multi_output(&self) -> bool {
        self.multi_output
    }

    /// Returns the relative paths this output will be written to.
    ///
    /// A single output always yields `{filename}.{file_type}`, whatever
    /// `total_count` is. A multi output yields `{filename}_{i}.{file_type}`
    /// for `i` in `0..total_count`, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptflow::core::OutputDescriptor;
    /// use std::path::PathBuf;
    ///
    /// let output = OutputDescriptor::new("test", "Test", "", true).unwrap();
    /// assert_eq!(
    ///     output.get_paths("png", 2),
    ///     vec![PathBuf::from("test_0.png"), PathBuf::from("test_1.png")]
    /// );
    /// ```
    #[must_use]
    pub fn get_paths(&self, file_type: &str, total_count: usize) -> Vec<PathBuf> {
        if self.multi_output {
            (0..total_count)
                .map(|i| PathBuf::from(format!("{}_{i}.{file_type}", self.filename)))
                .collect()
        } else {
            vec![PathBuf::from(format!("{}.{file_type}", self.filename))]
        }
    }

    /// Expands this descriptor into a metadata record for the report.
    #[must_use]
    pub fn get_metadata(&self, file_type: &str, total_count: usize) -> OutputMetadata {
        OutputMetadata {
            filenames: self.get_paths(file_type, total_count),
            title: self.title.clone(),
            description: self.description.clone(),
            multi_output: self.multi_output,
        }
    }
}

/// Expanded, flattened metadata for one output descriptor.
///
/// This is what the report generator consumes: the concrete relative file
/// names plus the descriptive text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMetadata {
    /// Relative paths of the promised artifacts, in index order.
    pub filenames: Vec<PathBuf>,
    /// Human-readable title.
    pub title: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the artifacts form a numbered family.
    pub multi_output: bool,
}

impl OutputMetadata {
    /// Returns a copy keeping only the filenames that exist under
    /// `output_directory`.
    #[must_use]
    pub fn present_in(&self, output_directory: &Path) -> Self {
        Self {
            filenames: self
                .filenames
                .iter()
                .filter(|f| output_directory.join(f).is_file())
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Returns the filenames that do not exist under `output_directory`.
    #[must_use]
    pub fn missing_in(&self, output_directory: &Path) -> Vec<PathBuf> {
        self.filenames
            .iter()
            .filter(|f| !output_directory.join(f).is_file())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single() -> OutputDescriptor {
        OutputDescriptor::new("x_against_y", "X against Y", "First vs second column", false)
            .unwrap()
    }

    fn multi() -> OutputDescriptor {
        OutputDescriptor::new("hist", "Histogram", "One per input", true).unwrap()
    }

    #[test]
    fn test_single_output_ignores_count() {
        for count in [0, 1, 5] {
            assert_eq!(
                single().get_paths("png", count),
                vec![PathBuf::from("x_against_y.png")]
            );
        }
    }

    #[test]
    fn test_multi_output_numbered_paths() {
        assert_eq!(
            multi().get_paths("pdf", 3),
            vec![
                PathBuf::from("hist_0.pdf"),
                PathBuf::from("hist_1.pdf"),
                PathBuf::from("hist_2.pdf"),
            ]
        );
    }

    #[test]
    fn test_multi_output_zero_count() {
        assert!(multi().get_paths("png", 0).is_empty());
    }

    #[test]
    fn test_get_metadata_is_deterministic() {
        let output = multi();
        let first = output.get_metadata("png", 2);
        let second = output.get_metadata("png", 2);

        assert_eq!(first, second);
        assert_eq!(first.title, "Histogram");
        assert_eq!(first.description, "One per input");
        assert!(first.multi_output);
        assert_eq!(first.filenames.len(), 2);
    }

    #[test]
    fn test_new_rejects_bad_stem() {
        assert!(OutputDescriptor::new("", "t", "d", false).is_err());
        assert!(OutputDescriptor::new("a/b", "t", "d", false).is_err());
    }

    #[test]
    fn test_present_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hist_1.png"), b"png").unwrap();

        let metadata = multi().get_metadata("png", 3);

        let present = metadata.present_in(dir.path());
        assert_eq!(present.filenames, vec![PathBuf::from("hist_1.png")]);
        assert_eq!(present.title, metadata.title);

        assert_eq!(
            metadata.missing_in(dir.path()),
            vec![PathBuf::from("hist_0.png"), PathBuf::from("hist_2.png")]
        );
    }

    #[test]
    fn test_metadata_serialization() {
        let json = serde_json::to_value(single().get_metadata("svg", 1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "filenames": ["x_against_y.svg"],
                "title": "X against Y",
                "description": "First vs second column",
                "multi_output": false,
            })
        );
    }
}
