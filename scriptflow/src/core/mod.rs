//! Core data model.
//!
//! This module contains the descriptor types built by discovery and the
//! outcome enum produced by the runner:
//! - Output descriptors and their expanded metadata records
//! - Script descriptors
//! - Run outcome classification

mod output;
mod script;
mod status;

pub use output::{OutputDescriptor, OutputMetadata};
pub use script::{ScriptDescriptor, UNKNOWN_AUTHOR};
pub use status::{RunOutcome, WARNING_MARKER};
