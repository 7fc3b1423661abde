//! Script discovery.
//!
//! Scans a directory for candidate scripts, pulls the JSON frontmatter out
//! of each script's leading documentation block, and builds a frozen
//! [`ScriptCatalog`].

mod catalog;
mod frontmatter;
mod scanner;

pub use catalog::ScriptCatalog;
pub use frontmatter::{parse_frontmatter, FlagValue};
pub use scanner::{scan_frontmatter, Frontmatter, FrontmatterScanner, ScanState};
