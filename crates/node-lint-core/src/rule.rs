//! Rule trait for defining line rules.

use regex::Regex;
use thiserror::Error;

use crate::context::LineContext;
use crate::types::{RuleKind, Violation};

/// Errors raised while building rules or the scanner.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A line pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        /// The pattern that failed.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

impl RuleError {
    /// Compiles `pattern`, attaching it to the error on failure.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Pattern`] if the regex is invalid.
    pub fn compile(pattern: &str) -> Result<Regex, Self> {
        Regex::new(pattern).map_err(|source| Self::Pattern {
            pattern: pattern.to_string(),
            source,
        })
    }
}

/// A per-line lint rule.
///
/// Rules are stateless: everything they may look at is in the
/// [`LineContext`], which the scanner rebuilds for every line. A rule yields
/// at most one violation per line.
///
/// # Example
///
/// ```ignore
/// use node_lint_core::{LineContext, Rule, RuleKind, Violation};
///
/// pub struct NoGotoInNodes;
///
/// impl Rule for NoGotoInNodes {
///     fn kind(&self) -> RuleKind { RuleKind::ForbiddenStaticField }
///
///     fn check_line(&self, ctx: &LineContext<'_>) -> Option<Violation> {
///         if !ctx.at_member_level() || !ctx.sanitized.contains("goto") {
///             return None;
///         }
///         Some(Violation::new(self.kind(), ctx.location(), ctx.trimmed()))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the rule this implementation checks.
    fn kind(&self) -> RuleKind;

    /// Returns the kebab-case name of this rule (e.g., "forbidden-field-type").
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the rule code (e.g., "NL001").
    fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single line.
    fn check_line(&self, ctx: &LineContext<'_>) -> Option<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
