//! # Scriptflow
//!
//! Discovers analysis scripts in a directory, runs each one as a subprocess
//! with a shared set of flags, and classifies every run as a success, a
//! warning or a failure.
//!
//! Scriptflow provides:
//!
//! - **Frontmatter discovery**: scripts describe themselves with a JSON block
//!   inside their leading documentation comment
//! - **Uniform invocation**: every script receives the same data files, output
//!   directory, file type, figure count and style sheet
//! - **Outcome classification**: exit status plus a warning marker scan of
//!   both output streams
//! - **Metadata aggregation**: the filenames, titles and descriptions every
//!   script promises to produce, for a downstream report generator
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scriptflow::prelude::*;
//!
//! let mut runner = ScriptRunner::discover("scripts", &DiscoveryConfig::default())?;
//! let params = RunParameters::new("out", "png", 2).with_data("run_0.hdf5");
//!
//! let summary = runner.run(&params).await;
//! println!("{summary}");
//!
//! let metadata = runner.get_metadata("png", 2);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod aggregate;
pub mod config;
pub mod core;
pub mod discovery;
pub mod errors;
pub mod events;
pub mod observability;
pub mod runner;
pub mod utils;

#[cfg(test)]
mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aggregate::{aggregate_metadata, MetadataReport};
    pub use crate::config::{DiscoveryConfig, RunConfig};
    pub use crate::core::{OutputDescriptor, OutputMetadata, RunOutcome, ScriptDescriptor};
    pub use crate::discovery::ScriptCatalog;
    pub use crate::errors::{ConfigError, DiscoveryError, ScriptflowError};
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink, RunEvent};
    pub use crate::runner::{
        ProcessLauncher, RunParameters, RunResult, RunSummary, ScriptLauncher, ScriptRunner,
    };
    pub use crate::utils::Timestamp;
}
