//! Rule to forbid `String` data members in `Node` subclasses.
//!
//! # Rationale
//!
//! Node instances may be allocated in PSRAM while `String` keeps its buffer on
//! the heap. A `String` member therefore ties every instance to heap storage
//! that is not safe to share across instances and can crash the device.
//!
//! # Detection
//!
//! Fires on lines at member level of a class deriving from the base type that
//! look like `[static] [const] String name [N] (= | ;)` with shallow
//! indentation and no `(` (method signatures returning `String` are fine).
//!
//! # Configuration
//!
//! - `scan.forbidden_field_type`: the forbidden type (default: `String`)
//! - `scan.max_member_indent`: indentation limit (default: 3)

use node_lint_core::{LineContext, Rule, RuleError, RuleKind, ScanConfig, Suggestion, Violation};
use regex::Regex;

/// Rule kind checked by this module.
pub const KIND: RuleKind = RuleKind::ForbiddenFieldType;

/// Rule name for forbidden-field-type.
pub const NAME: &str = "forbidden-field-type";

/// Forbids data members of the forbidden type in base-deriving classes.
#[derive(Debug, Clone)]
pub struct ForbiddenFieldType {
    pattern: Regex,
    type_name: String,
    base_type: String,
}

impl ForbiddenFieldType {
    /// Creates the rule for the types named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the member pattern fails to compile.
    pub fn new(config: &ScanConfig) -> Result<Self, RuleError> {
        let pattern = format!(
            r"^\s{{0,{indent}}}(?:static\s+)?(?:const\s+)?{ty}\s+\w+(?:\s*\[.*?\])?\s*(?:=|;)",
            indent = config.max_member_indent,
            ty = regex::escape(&config.forbidden_field_type),
        );

        Ok(Self {
            pattern: RuleError::compile(&pattern)?,
            type_name: config.forbidden_field_type.clone(),
            base_type: config.base_type.clone(),
        })
    }
}

impl Rule for ForbiddenFieldType {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Forbids String data members in Node subclasses"
    }

    fn check_line(&self, ctx: &LineContext<'_>) -> Option<Violation> {
        if !ctx.at_member_level()
            || ctx.sanitized.contains('(')
            || !self.pattern.is_match(ctx.sanitized)
        {
            return None;
        }

        let message = format!(
            "{NAME}: {} member in {} subclass must not share heap/PSRAM-unsafe string storage across instances: {}",
            self.type_name,
            self.base_type,
            ctx.trimmed()
        );

        Some(
            Violation::new(KIND, ctx.location(), message)
                .with_suggestion(Suggestion::new("Use Char<N> or char[N] instead")),
        )
    }
}
