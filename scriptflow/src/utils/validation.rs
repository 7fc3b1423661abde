//! Validation helpers for frontmatter values.
//!
//! Frontmatter is written by hand, so booleans show up as `true`, `"True"`,
//! `"yes"`, `1` and friends. [`parse_flag`] accepts a closed set of spellings
//! and rejects everything else rather than guessing.

use crate::errors::FlagParseError;

const TRUE_FORMS: &[&str] = &["true", "t", "yes", "y", "on", "1"];
const FALSE_FORMS: &[&str] = &["false", "f", "no", "n", "off", "0"];

/// Parses a textual boolean flag.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Examples
///
/// ```
/// use scriptflow::utils::parse_flag;
///
/// assert_eq!(parse_flag("True"), Ok(true));
/// assert_eq!(parse_flag("no"), Ok(false));
/// assert!(parse_flag("maybe").is_err());
/// ```
pub fn parse_flag(value: &str) -> Result<bool, FlagParseError> {
    let normalized = value.trim().to_ascii_lowercase();

    if TRUE_FORMS.contains(&normalized.as_str()) {
        Ok(true)
    } else if FALSE_FORMS.contains(&normalized.as_str()) {
        Ok(false)
    } else {
        Err(FlagParseError {
            value: value.to_string(),
        })
    }
}

/// Validates that `stem` can be used as a bare file name stem.
///
/// Output filenames are joined onto the output directory by the scripts
/// themselves, so a stem must not be empty, must not be `.`/`..` and must not
/// contain path separators or NUL bytes.
pub fn validate_filename_stem(stem: &str) -> Result<(), InvalidNameError> {
    if stem.trim().is_empty() {
        return Err(InvalidNameError {
            reason: "filename cannot be empty or whitespace-only".to_string(),
        });
    }

    if stem == "." || stem == ".." {
        return Err(InvalidNameError {
            reason: format!("'{stem}' is not a file name"),
        });
    }

    if let Some(bad) = stem.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
        return Err(InvalidNameError {
            reason: format!("filename '{}' contains forbidden character {bad:?}", stem.escape_default()),
        });
    }

    Ok(())
}

/// Error indicating an invalid name.
#[derive(Debug, Clone)]
pub struct InvalidNameError {
    /// The reason the name is invalid.
    pub reason: String,
}

impl std::fmt::Display for InvalidNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid name: {}", self.reason)
    }
}

impl std::error::Error for InvalidNameError {}
