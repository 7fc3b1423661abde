//! POSIX shell quoting for copy-pasteable command lines.

/// Quotes a single argument for a POSIX shell.
///
/// Arguments made only of characters that are safe unquoted are returned
/// as-is; everything else is wrapped in single quotes, with embedded single
/// quotes written as `'\''`.
#[must_use]
pub fn quote_arg(arg: &str) -> String {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || "_-./=:,+@%".contains(c);

    if !arg.is_empty() && arg.chars().all(is_safe) {
        return arg.to_string();
    }

    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Joins a program and its arguments into one shell command line.
#[must_use]
pub fn render_command_line<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| quote_arg(p.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
