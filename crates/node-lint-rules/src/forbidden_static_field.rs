//! Rule to forbid mutable `static` data members in `Node` subclasses.
//!
//! # Rationale
//!
//! Several instances of the same node can run at once. A static data member is
//! shared by all of them, so one instance silently changes another's state.
//!
//! `static const` and `static constexpr` members are compile-time constants and
//! are allowed, as are static methods (any line containing `(`).

use node_lint_core::{LineContext, Rule, RuleError, RuleKind, ScanConfig, Violation};
use regex::Regex;

/// Rule kind checked by this module.
pub const KIND: RuleKind = RuleKind::ForbiddenStaticField;

/// Rule name for forbidden-static-field.
pub const NAME: &str = "forbidden-static-field";

/// Qualifiers that make a static member a constant.
const CONSTANT_QUALIFIERS: &[&str] = &["const", "constexpr"];

/// Forbids non-constant static data members in base-deriving classes.
#[derive(Debug, Clone)]
pub struct ForbiddenStaticField {
    pattern: Regex,
    base_type: String,
}

impl ForbiddenStaticField {
    /// Creates the rule for the base type and indentation in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the member pattern fails to compile.
    pub fn new(config: &ScanConfig) -> Result<Self, RuleError> {
        let pattern = format!(
            r"^\s{{0,{indent}}}static\s+(\w*)",
            indent = config.max_member_indent
        );

        Ok(Self {
            pattern: RuleError::compile(&pattern)?,
            base_type: config.base_type.clone(),
        })
    }
}

impl Rule for ForbiddenStaticField {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Forbids non-const static data members in Node subclasses"
    }

    fn check_line(&self, ctx: &LineContext<'_>) -> Option<Violation> {
        if !ctx.at_member_level() || ctx.sanitized.contains('(') {
            return None;
        }

        let qualifier = self.pattern.captures(ctx.sanitized)?.get(1)?.as_str();
        if CONSTANT_QUALIFIERS.contains(&qualifier) {
            return None;
        }

        let message = format!(
            "{NAME}: static data member in {} subclass, multiple instances must not share state: {}",
            self.base_type,
            ctx.trimmed()
        );
        Some(Violation::new(KIND, ctx.location(), message))
    }
}
