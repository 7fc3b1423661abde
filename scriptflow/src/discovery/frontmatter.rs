//! Frontmatter schema and conversion into descriptors.

use serde::Deserialize;
use std::path::Path;

use crate::core::{OutputDescriptor, ScriptDescriptor, UNKNOWN_AUTHOR};
use crate::errors::{DiscoveryError, FlagParseError};
use crate::utils::parse_flag;

/// A boolean as authors actually write it: `true`, `"True"`, `"yes"`, `1`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A JSON boolean.
    Bool(bool),
    /// A JSON integer; only `0` and `1` are accepted.
    Int(i64),
    /// A string, resolved by [`parse_flag`].
    Text(String),
}

impl FlagValue {
    /// Resolves the value to a boolean.
    pub fn resolve(&self) -> Result<bool, FlagParseError> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Int(0) => Ok(false),
            Self::Int(1) => Ok(true),
            Self::Int(other) => Err(FlagParseError {
                value: other.to_string(),
            }),
            Self::Text(text) => parse_flag(text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawFrontmatter {
    name: String,
    #[serde(default)]
    created_by: Option<String>,
    #[serde(default)]
    contact_email: Option<String>,
    #[serde(default)]
    capture_stdout: Option<FlagValue>,
    outputs: Vec<RawOutput>,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    filename: String,
    title: String,
    description: String,
    multi_output: FlagValue,
}

/// Parses raw frontmatter text read from `path` into a descriptor.
///
/// Every problem is fatal and reported against `path`.
pub fn parse_frontmatter(raw: &str, path: &Path) -> Result<ScriptDescriptor, DiscoveryError> {
    let parsed: RawFrontmatter =
        serde_json::from_str(raw).map_err(|source| DiscoveryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let field_error = |field: String, reason: String| DiscoveryError::Field {
        path: path.to_path_buf(),
        field,
        reason,
    };

    let capture_stdout = match &parsed.capture_stdout {
        Some(flag) => flag
            .resolve()
            .map_err(|e| field_error("capture_stdout".to_string(), e.to_string()))?,
        None => false,
    };

    let mut script = ScriptDescriptor::new(parsed.name)
        .with_created_by(parsed.created_by.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()))
        .with_contact_email(parsed.contact_email.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()))
        .with_capture_stdout(capture_stdout);

    for (index, raw_output) in parsed.outputs.into_iter().enumerate() {
        let multi_output = raw_output.multi_output.resolve().map_err(|e| {
            field_error(format!("outputs[{index}].multi_output"), e.to_string())
        })?;

        let output = OutputDescriptor::new(
            raw_output.filename,
            raw_output.title,
            raw_output.description,
            multi_output,
        )
        .map_err(|e| field_error(format!("outputs[{index}].filename"), e.reason))?;

        script = script.with_output(output);
    }

    Ok(script)
}
