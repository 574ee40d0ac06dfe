//! Context types for rule execution.

use std::path::Path;

use crate::member::MemberLevelContext;
use crate::types::Location;

/// Everything a rule may inspect for one line.
///
/// Built by the scanner after the scope tracker has applied the line, so
/// `brace_depth` and `member` describe the state *after* this line's braces.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// File the line belongs to, as reported in violations.
    pub file: &'a Path,
    /// Line number (1-indexed).
    pub line_number: usize,
    /// Byte offset of the line start within the file.
    pub offset: usize,
    /// The line as written, without its line terminator.
    pub raw: &'a str,
    /// The line with literal contents and trailing comment removed.
    pub sanitized: &'a str,
    /// Brace depth after this line.
    pub brace_depth: usize,
    /// Member-level context of the governing class.
    pub member: MemberLevelContext,
}

impl LineContext<'_> {
    /// Whether the line sits at member level of a base-deriving class.
    #[must_use]
    pub fn at_member_level(&self) -> bool {
        self.member.is_member_line(self.brace_depth)
    }

    /// The raw line with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.raw.trim()
    }

    /// Location spanning the trimmed line.
    #[must_use]
    pub fn location(&self) -> Location {
        let indent = self.raw.len() - self.raw.trim_start().len();
        let column = self.raw[..indent].chars().count() + 1;
        Location::new(self.file.to_path_buf(), self.line_number, column)
            .with_span(self.offset + indent, self.trimmed().len())
    }
}
