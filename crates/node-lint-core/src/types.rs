//! Core types for lint violations and results.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The closed set of checks node-lint knows about.
///
/// Declaration order is the order rules run in for a single line, so
/// violations on the same line always come out in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// A data member of the forbidden type (`String`) in a base-deriving class.
    ForbiddenFieldType,
    /// A non-constant `static` data member in a base-deriving class.
    ForbiddenStaticField,
    /// A direct call to the forbidden logging receiver (`Serial.print*`).
    ForbiddenLoggingCall,
}

impl RuleKind {
    /// Every rule kind, in evaluation order.
    pub const ALL: [Self; 3] = [
        Self::ForbiddenFieldType,
        Self::ForbiddenStaticField,
        Self::ForbiddenLoggingCall,
    ];

    /// Returns the kebab-case rule name (e.g., "forbidden-field-type").
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ForbiddenFieldType => "forbidden-field-type",
            Self::ForbiddenStaticField => "forbidden-static-field",
            Self::ForbiddenLoggingCall => "forbidden-logging-call",
        }
    }

    /// Returns the stable rule code (e.g., "NL001").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::ForbiddenFieldType => "NL001",
            Self::ForbiddenStaticField => "NL002",
            Self::ForbiddenLoggingCall => "NL003",
        }
    }

    /// Looks a rule up by name or code.
    #[must_use]
    pub fn from_name_or_code(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == key || kind.code().eq_ignore_ascii_case(key))
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as discovered under the scanned root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A lint violation found during scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "NL001").
    pub code: String,
    /// Rule that produced this violation.
    pub rule: RuleKind,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation for the given rule.
    #[must_use]
    pub fn new(rule: RuleKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            code: rule.code().to_string(),
            rule,
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Formats the violation as a multi-line block for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}", self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.rule,
            self.message
        )
    }
}

/// A violation rendered as a miette diagnostic.
///
/// Attach the file's source with [`miette::Report::with_source_code`] to get
/// the offending line underlined.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: format!("[{}] {}", v.code, v.message),
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((v.location.offset, v.location.length)),
            label_message: v.rule.name().to_string(),
        }
    }
}

/// Aggregated result of scanning a set of files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found, in file order then line order.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the violations of one scanned file.
    pub fn record_file(&mut self, violations: Vec<Violation>) {
        self.violations.extend(violations);
        self.files_checked += 1;
    }

    /// Total number of violations.
    #[must_use]
    pub fn count(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if any violation was found, i.e. the run fails.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Counts violations per rule.
    #[must_use]
    pub fn count_by_rule(&self) -> BTreeMap<RuleKind, usize> {
        let mut counts = BTreeMap::new();
        for v in &self.violations {
            *counts.entry(v.rule).or_insert(0) += 1;
        }
        counts
    }

    /// Returns violations produced by the given rule.
    #[must_use]
    pub fn by_rule(&self, rule: RuleKind) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.rule == rule).collect()
    }

    /// One-line summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.has_violations() {
            format!("{} violation(s) found.", self.count())
        } else {
            format!(
                "node-lint: OK ({} files checked, 0 violations)",
                self.files_checked
            )
        }
    }
}
