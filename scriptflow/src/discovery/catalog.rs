//! Directory scan producing the catalog of runnable scripts.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::frontmatter::parse_frontmatter;
use super::scanner::{scan_frontmatter, Frontmatter};
use crate::config::DiscoveryConfig;
use crate::core::{OutputMetadata, ScriptDescriptor};
use crate::errors::DiscoveryError;

/// Discovered scripts and their source paths, index-aligned.
///
/// Entries are ordered lexicographically by path so that runs, summaries
/// and metadata are reproducible. The catalog is frozen once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptCatalog {
    scripts: Vec<ScriptDescriptor>,
    paths: Vec<PathBuf>,
}

impl ScriptCatalog {
    /// Scans `directory` (non-recursively) for scripts with frontmatter.
    ///
    /// Files without the configured extension, without a leading
    /// documentation block, or without a frontmatter block are skipped.
    /// The first malformed frontmatter block aborts discovery, as does a
    /// `config` with an empty token.
    pub fn discover(
        directory: impl AsRef<Path>,
        config: &DiscoveryConfig,
    ) -> Result<Self, DiscoveryError> {
        let directory = directory.as_ref();
        config
            .validate()
            .map_err(|source| DiscoveryError::Config {
                path: directory.to_path_buf(),
                source,
            })?;

        let dir_error = |source| DiscoveryError::Directory {
            path: directory.to_path_buf(),
            source,
        };

        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(directory).map_err(dir_error)? {
            let path = entry.map_err(dir_error)?.path();
            let matches_extension = path
                .extension()
                .is_some_and(|ext| ext == config.extension.as_str());
            if matches_extension && path.is_file() {
                candidates.push(path);
            }
        }
        candidates.sort();

        let mut catalog = Self::default();
        for path in candidates {
            let bytes = std::fs::read(&path).map_err(|source| DiscoveryError::Read {
                path: path.clone(),
                source,
            })?;
            let text = String::from_utf8_lossy(&bytes);

            match scan_frontmatter(&text, config) {
                Frontmatter::NotDocumented => {
                    debug!(path = %path.display(), "Skipping file without documentation block");
                }
                Frontmatter::Absent => {
                    debug!(path = %path.display(), "Skipping file without frontmatter");
                }
                Frontmatter::Present(raw) => {
                    let script = parse_frontmatter(&raw, &path)?;
                    debug!(
                        path = %path.display(),
                        name = script.name(),
                        outputs = script.outputs().len(),
                        "Discovered script"
                    );
                    catalog.push(script, path);
                }
            }
        }

        info!(
            directory = %directory.display(),
            scripts = catalog.len(),
            "Script discovery complete"
        );

        Ok(catalog)
    }

    /// Builds a catalog from already-constructed descriptors.
    ///
    /// Entries keep the order given.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (ScriptDescriptor, PathBuf)>) -> Self {
        let mut catalog = Self::default();
        for (script, path) in entries {
            catalog.push(script, path);
        }
        catalog
    }

    fn push(&mut self, script: ScriptDescriptor, path: PathBuf) {
        self.scripts.push(script);
        self.paths.push(path);
    }

    /// Returns the descriptors in catalog order.
    #[must_use]
    pub fn scripts(&self) -> &[ScriptDescriptor] {
        &self.scripts
    }

    /// Returns the source paths, aligned with [`Self::scripts`].
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Iterates over `(descriptor, path)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ScriptDescriptor, &Path)> {
        self.scripts
            .iter()
            .zip(self.paths.iter().map(PathBuf::as_path))
    }

    /// Returns the number of scripts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// Returns true if no scripts were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Flattens the metadata of every script; see
    /// [`crate::aggregate::aggregate_metadata`].
    #[must_use]
    pub fn get_metadata(&self, file_type: &str, total_count: usize) -> Vec<OutputMetadata> {
        crate::aggregate::aggregate_metadata(&self.scripts, file_type, total_count)
    }
}
