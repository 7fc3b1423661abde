//! Test fixtures for discovery and run tests.
//!
//! This module provides:
//! - Temporary script directories
//! - Generators for valid script headers

mod fixtures;

pub use fixtures::{python_script, shell_config, shell_script, ScriptDir};
