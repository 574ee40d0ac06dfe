//! Rule to forbid direct `Serial.print*` logging.
//!
//! # Rationale
//!
//! Direct serial output bypasses the project's log macros (`EXT_LOGD/I/W/E`),
//! so it cannot be filtered by level or routed elsewhere. This rule applies to
//! every line of every file, not only to `Node` subclasses.
//!
//! # Suppression
//!
//! A line carrying the exemption marker comment is skipped:
//!
//! ```text
//! Serial.println("boot");  // ok-lint
//! ```
//!
//! The marker is looked up in the raw line, since sanitizing removes comments.

use node_lint_core::{LineContext, Rule, RuleError, RuleKind, ScanConfig, Suggestion, Violation};
use regex::Regex;

/// Rule kind checked by this module.
pub const KIND: RuleKind = RuleKind::ForbiddenLoggingCall;

/// Rule name for forbidden-logging-call.
pub const NAME: &str = "forbidden-logging-call";

/// Forbids calls like `Serial.println(...)` outside exempted lines.
#[derive(Debug, Clone)]
pub struct ForbiddenLoggingCall {
    /// `None` when no methods are configured: nothing to forbid.
    call: Option<Regex>,
    exemption: Regex,
    receiver: String,
    marker: String,
}

impl ForbiddenLoggingCall {
    /// Creates the rule for the receiver, methods and marker in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn new(config: &ScanConfig) -> Result<Self, RuleError> {
        let call = if config.logging_methods.is_empty() {
            None
        } else {
            let methods: Vec<String> = config
                .logging_methods
                .iter()
                .map(|m| regex::escape(m))
                .collect();
            let pattern = format!(
                r"\b{}\.({})\b",
                regex::escape(&config.logging_receiver),
                methods.join("|")
            );
            Some(RuleError::compile(&pattern)?)
        };

        let exemption = RuleError::compile(&format!(
            r"//\s*{}",
            regex::escape(&config.exemption_marker)
        ))?;

        Ok(Self {
            call,
            exemption,
            receiver: config.logging_receiver.clone(),
            marker: config.exemption_marker.clone(),
        })
    }
}

impl Rule for ForbiddenLoggingCall {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Forbids Serial.print/println/printf/write; use the EXT_LOG* macros"
    }

    fn check_line(&self, ctx: &LineContext<'_>) -> Option<Violation> {
        let caps = self.call.as_ref()?.captures(ctx.sanitized)?;
        if self.exemption.is_match(ctx.raw) {
            return None;
        }

        let method = caps.get(1).map_or("", |m| m.as_str());
        let message = format!(
            "{NAME}: {}.{method} bypasses the log macros: {}",
            self.receiver,
            ctx.trimmed()
        );

        Some(
            Violation::new(KIND, ctx.location(), message).with_suggestion(Suggestion::new(
                format!(
                    "Use EXT_LOGD/I/W/E(TAG, ...) instead, or mark the line with `// {}`",
                    self.marker
                ),
            )),
        )
    }
}
