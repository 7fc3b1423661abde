//! Metadata aggregation for the report generator.
//!
//! Aggregation describes what scripts *promise* to produce. It never looks
//! at run results; consumers compare the promised filenames against the
//! output directory to find missing artifacts.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::{OutputMetadata, ScriptDescriptor};
use crate::errors::ScriptflowError;
use crate::utils::{format_date, now_utc};

/// Flattens the metadata of every script, in script-then-output order.
#[must_use]
pub fn aggregate_metadata(
    scripts: &[ScriptDescriptor],
    file_type: &str,
    total_count: usize,
) -> Vec<OutputMetadata> {
    scripts
        .iter()
        .flat_map(|script| script.get_metadata(file_type, total_count))
        .collect()
}

/// Aggregated metadata plus the parameters it was expanded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataReport {
    /// File type the filenames were expanded with.
    pub file_type: String,
    /// Figure count the filenames were expanded with.
    pub number_of_figures: usize,
    /// Date the report was built (`YYYY-MM-DD`).
    pub creation_date: String,
    /// Flattened output records.
    pub outputs: Vec<OutputMetadata>,
}

impl MetadataReport {
    /// Builds a report for `scripts`.
    #[must_use]
    pub fn build(scripts: &[ScriptDescriptor], file_type: &str, total_count: usize) -> Self {
        Self {
            file_type: file_type.to_string(),
            number_of_figures: total_count,
            creation_date: format_date(&now_utc()),
            outputs: aggregate_metadata(scripts, file_type, total_count),
        }
    }

    /// Returns a copy keeping only artifacts present under `output_directory`.
    ///
    /// Records left with no filenames are dropped.
    #[must_use]
    pub fn present_in(&self, output_directory: &Path) -> Self {
        Self {
            outputs: self
                .outputs
                .iter()
                .map(|record| record.present_in(output_directory))
                .filter(|record| !record.filenames.is_empty())
                .collect(),
            ..self.clone()
        }
    }

    /// Lists promised artifacts missing from `output_directory`.
    #[must_use]
    pub fn missing_in(&self, output_directory: &Path) -> Vec<PathBuf> {
        self.outputs
            .iter()
            .flat_map(|record| record.missing_in(output_directory))
            .collect()
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json(&self) -> Result<String, ScriptflowError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report as JSON to `path`.
    pub fn write_json(&self, path: &Path) -> Result<(), ScriptflowError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OutputDescriptor;
    use pretty_assertions::assert_eq;

    fn script(name: &str) -> ScriptDescriptor {
        ScriptDescriptor::new(name)
            .with_output(
                OutputDescriptor::new(format!("{name}_single"), format!("{name} single"), "", false)
                    .unwrap(),
            )
            .with_output(
                OutputDescriptor::new(format!("{name}_multi"), format!("{name} multi"), "", true)
                    .unwrap(),
            )
    }

    #[test]
    fn test_two_scripts_four_records_in_order() {
        let scripts = vec![script("a"), script("b")];
        let records = aggregate_metadata(&scripts, "png", 2);

        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a single", "a multi", "b single", "b multi"]);

        assert_eq!(records[0].filenames, vec![PathBuf::from("a_single.png")]);
        assert_eq!(
            records[3].filenames,
            vec![PathBuf::from("b_multi_0.png"), PathBuf::from("b_multi_1.png")]
        );
    }

    #[test]
    fn test_empty_catalog() {
        assert!(aggregate_metadata(&[], "png", 3).is_empty());
    }

    #[test]
    fn test_report_presence_filtering() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a_multi_0.png"), b"").unwrap();

        let report = MetadataReport::build(&[script("a")], "png", 2);
        let present = report.present_in(dir.path());

        assert_eq!(present.outputs.len(), 1);
        assert_eq!(present.outputs[0].filenames, vec![PathBuf::from("a_multi_0.png")]);
        assert_eq!(
            report.missing_in(dir.path()),
            vec![PathBuf::from("a_single.png"), PathBuf::from("a_multi_1.png")]
        );
    }

    #[test]
    fn test_report_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.json");

        let report = MetadataReport::build(&[script("a")], "pdf", 1);
        report.write_json(&path).unwrap();

        let loaded: MetadataReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, report);
        assert_eq!(loaded.creation_date.len(), "2024-01-01".len());
    }
}
