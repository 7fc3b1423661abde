//! Small shared helpers: flag parsing, name validation, shell quoting and
//! timestamps.

mod shell;
pub mod timestamps;
mod validation;

pub use shell::{quote_arg, render_command_line};
pub use timestamps::{format_date, format_iso8601, now_utc, Timestamp};
pub use validation::{parse_flag, validate_filename_stem, InvalidNameError};
