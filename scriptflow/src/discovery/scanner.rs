//! Line scanner that pulls the frontmatter block out of a script header.
//!
//! The scanner is a three-state machine and never touches the filesystem,
//! so the skip-versus-parse decision can be tested on plain strings.

use crate::config::DiscoveryConfig;

/// Where the scanner currently is in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Before the first line has been seen.
    OutsideComment,
    /// Inside the documentation block, no frontmatter seen yet.
    InComment,
    /// Between the two frontmatter delimiters.
    InBlock,
}

/// What a scan found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frontmatter {
    /// The first line does not open a documentation block.
    NotDocumented,
    /// The documentation block closed (or the file ended) before any
    /// frontmatter delimiter.
    Absent,
    /// Raw frontmatter text, lines joined with `\n`.
    Present(String),
}

/// Incremental frontmatter scanner.
#[derive(Debug)]
pub struct FrontmatterScanner<'a> {
    doc_delimiter: &'a str,
    frontmatter_delimiter: &'a str,
    state: ScanState,
    collected: String,
    result: Option<Frontmatter>,
}

impl<'a> FrontmatterScanner<'a> {
    /// Creates a scanner for the delimiters in `config`.
    #[must_use]
    pub fn new(config: &'a DiscoveryConfig) -> Self {
        Self {
            doc_delimiter: &config.doc_delimiter,
            frontmatter_delimiter: &config.frontmatter_delimiter,
            state: ScanState::OutsideComment,
            collected: String::new(),
            result: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Returns true once no further lines can change the result.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.result.is_some()
    }

    /// Feeds one line (without its terminator). Returns true when done.
    pub fn push_line(&mut self, line: &str) -> bool {
        if self.is_done() {
            return true;
        }

        match self.state {
            ScanState::OutsideComment => {
                if line.contains(self.doc_delimiter) {
                    self.state = ScanState::InComment;
                } else {
                    self.result = Some(Frontmatter::NotDocumented);
                }
            }
            ScanState::InComment => {
                // The frontmatter delimiter is checked first so a line holding
                // both tokens opens the block.
                if line.contains(self.frontmatter_delimiter) {
                    self.state = ScanState::InBlock;
                } else if line.contains(self.doc_delimiter) {
                    self.result = Some(Frontmatter::Absent);
                }
            }
            ScanState::InBlock => {
                if line.contains(self.frontmatter_delimiter) {
                    self.result = Some(Frontmatter::Present(std::mem::take(&mut self.collected)));
                } else {
                    self.collected.push_str(line);
                    self.collected.push('\n');
                }
            }
        }

        self.is_done()
    }

    /// Finishes the scan at end of input.
    ///
    /// A block left open at end of input is returned as-is and parsed like a
    /// closed one.
    #[must_use]
    pub fn finish(self) -> Frontmatter {
        if let Some(result) = self.result {
            return result;
        }

        match self.state {
            ScanState::OutsideComment => Frontmatter::NotDocumented,
            ScanState::InComment => Frontmatter::Absent,
            ScanState::InBlock => Frontmatter::Present(self.collected),
        }
    }
}

/// Scans a whole script text.
#[must_use]
pub fn scan_frontmatter(text: &str, config: &DiscoveryConfig) -> Frontmatter {
    let mut scanner = FrontmatterScanner::new(config);
    for line in text.lines() {
        if scanner.push_line(line) {
            break;
        }
    }
    scanner.finish()
}
