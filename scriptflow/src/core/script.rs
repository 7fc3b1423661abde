//! Script descriptors built from frontmatter.

use serde::Serialize;

use super::{OutputDescriptor, OutputMetadata};

/// Author placeholder used when the frontmatter does not name one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Describes one discovered script: identity, authorship and the outputs it
/// declares.
///
/// All fields are resolved at discovery time; there is no lazy state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptDescriptor {
    name: String,
    created_by: String,
    contact_email: String,
    capture_stdout: bool,
    outputs: Vec<OutputDescriptor>,
}

impl ScriptDescriptor {
    /// Creates a descriptor with unknown authorship and no outputs.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_by: UNKNOWN_AUTHOR.to_string(),
            contact_email: UNKNOWN_AUTHOR.to_string(),
            capture_stdout: false,
            outputs: Vec::new(),
        }
    }

    /// Sets the author.
    #[must_use]
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    /// Sets the contact email.
    #[must_use]
    pub fn with_contact_email(mut self, contact_email: impl Into<String>) -> Self {
        self.contact_email = contact_email.into();
        self
    }

    /// Sets whether stdout is kept after a successful run.
    #[must_use]
    pub fn with_capture_stdout(mut self, capture_stdout: bool) -> Self {
        self.capture_stdout = capture_stdout;
        self
    }

    /// Appends an output descriptor.
    #[must_use]
    pub fn with_output(mut self, output: OutputDescriptor) -> Self {
        self.outputs.push(output);
        self
    }

    /// Returns the script name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the author, or `"Unknown"`.
    #[must_use]
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Returns the contact email, or `"Unknown"`.
    #[must_use]
    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    /// Returns true if stdout should be retained after a successful run.
    #[must_use]
    pub fn captures_stdout(&self) -> bool {
        self.capture_stdout
    }

    /// Returns the declared outputs in declaration order.
    #[must_use]
    pub fn outputs(&self) -> &[OutputDescriptor] {
        &self.outputs
    }

    /// Expands every output into a metadata record, in declaration order.
    #[must_use]
    pub fn get_metadata(&self, file_type: &str, total_count: usize) -> Vec<OutputMetadata> {
        self.outputs
            .iter()
            .map(|output| output.get_metadata(file_type, total_count))
            .collect()
    }
}
