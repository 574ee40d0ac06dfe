//! Per-file line scanner.
//!
//! Runs the sanitize → track scope → resolve member level → match rules
//! pipeline over one file. Every call starts from a fresh [`ScanState`], so a
//! scan is a pure function of the file content and the scanner's rules.

use std::path::Path;

use tracing::trace;

use crate::config::ScanConfig;
use crate::context::LineContext;
use crate::rule::{RuleBox, RuleError};
use crate::sanitize::sanitize_line;
use crate::scope::{ClassMatcher, ScanState};
use crate::types::Violation;

/// Scans files line by line with a fixed, ordered rule set.
pub struct Scanner {
    classes: ClassMatcher,
    rules: Vec<RuleBox>,
}

impl Scanner {
    /// Creates a scanner. Rules run in the order given.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration pattern fails to compile.
    pub fn new(config: &ScanConfig, rules: Vec<RuleBox>) -> Result<Self, RuleError> {
        Ok(Self {
            classes: ClassMatcher::new(config.base_type.clone())?,
            rules,
        })
    }

    /// Returns the registered rules, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Scans file content and returns its violations in line order.
    #[must_use]
    pub fn scan(&self, file: &Path, content: &str) -> Vec<Violation> {
        self.scan_with_state(file, content).0
    }

    /// Scans a sequence of lines (without terminators).
    #[must_use]
    pub fn scan_lines<'a, I>(&self, file: &Path, lines: I) -> Vec<Violation>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut offset = 0;
        let lines = lines.into_iter().map(|line| {
            let start = offset;
            offset += line.len() + 1;
            (start, line)
        });
        self.run(file, lines).0
    }

    /// Scans file content and also returns the state left at end of file.
    #[must_use]
    pub fn scan_with_state(&self, file: &Path, content: &str) -> (Vec<Violation>, ScanState) {
        self.run(file, split_lines(content))
    }

    fn run<'a, I>(&self, file: &Path, lines: I) -> (Vec<Violation>, ScanState)
    where
        I: Iterator<Item = (usize, &'a str)>,
    {
        let mut state = ScanState::new();
        let mut violations = Vec::new();

        for (index, (offset, raw)) in lines.enumerate() {
            let line_number = index + 1;
            let sanitized = sanitize_line(raw);

            let decl = self.classes.match_line(&sanitized);
            if let Some(decl) = &decl {
                trace!(
                    "{}:{line_number}: open {} (derives from {}: {})",
                    file.display(),
                    decl.name,
                    self.classes.base_type(),
                    decl.derives_from_base
                );
            }
            for frame in state.advance(decl, &sanitized) {
                trace!("{}:{line_number}: close {}", file.display(), frame.name);
            }

            let ctx = LineContext {
                file,
                line_number,
                offset,
                raw,
                sanitized: &sanitized,
                brace_depth: state.brace_depth(),
                member: state.member_level(),
            };

            violations.extend(self.rules.iter().filter_map(|rule| rule.check_line(&ctx)));
        }

        (violations, state)
    }
}

/// Splits content into `(byte offset, line)` pairs, dropping `\n` / `\r\n`.
fn split_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    content.split_inclusive('\n').map(move |chunk| {
        let start = offset;
        offset += chunk.len();
        let line = chunk.strip_suffix('\n').unwrap_or(chunk);
        let line = line.strip_suffix('\r').unwrap_or(line);
        (start, line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use crate::types::{RuleKind, Violation};

    /// Flags every member-level line, to observe the scope gate directly.
    struct MemberLines;

    impl Rule for MemberLines {
        fn kind(&self) -> RuleKind {
            RuleKind::ForbiddenFieldType
        }

        fn check_line(&self, ctx: &LineContext<'_>) -> Option<Violation> {
            ctx.at_member_level()
                .then(|| Violation::new(self.kind(), ctx.location(), ctx.trimmed()))
        }
    }

    fn scanner() -> Scanner {
        Scanner::new(&ScanConfig::default(), vec![Box::new(MemberLines)]).expect("scanner")
    }

    fn member_lines(content: &str) -> Vec<usize> {
        scanner()
            .scan(Path::new("t.h"), content)
            .iter()
            .map(|v| v.location.line)
            .collect()
    }

    #[test]
    fn split_lines_tracks_offsets_and_crlf() {
        let lines: Vec<_> = split_lines("a\r\nbc\nd").collect();
        assert_eq!(lines, vec![(0, "a"), (3, "bc"), (6, "d")]);
    }

    #[test]
    fn only_member_level_lines_of_deriving_class() {
        let content = "\
class Effect : public Node {
  int a;
  void loop() {
    int local;
  }
};
class Plain {
  int b;
};
";
        // Line 1 ends at member depth too; line 5 closes the method body.
        assert_eq!(member_lines(content), vec![1, 2, 5]);
    }

    #[test]
    fn nested_non_deriving_class_members_are_not_member_level() {
        let content = "\
class Outer : public Node {
  class Inner {
    String s;
  };
};
";
        assert_eq!(member_lines(content), vec![1, 4]);
    }

    #[test]
    fn balanced_input_leaves_empty_state() {
        let (_, state) = scanner().scan_with_state(
            Path::new("t.h"),
            "namespace a {\nclass X : Node {\n  int y; // }\n};\n}\n",
        );
        assert!(state.is_balanced());
    }

    #[test]
    fn scan_lines_matches_scan() {
        let content = "class Effect : public Node {\n  int a;\n};";
        let by_content = scanner().scan(Path::new("t.h"), content);
        let by_lines = scanner().scan_lines(Path::new("t.h"), content.lines());
        assert_eq!(by_content, by_lines);
    }

    #[test]
    fn violation_spans_point_into_content() {
        let content = "class Effect : public Node {\r\n   int a;\r\n};\r\n";
        let violations = scanner().scan(Path::new("t.h"), content);
        let second = &violations[1].location;
        assert_eq!(&content[second.offset..second.offset + second.length], "int a;");
    }
}
