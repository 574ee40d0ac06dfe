//! # node-lint-rules
//!
//! Built-in lint rules for node-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Scope | Description |
//! |------|------|-------|-------------|
//! | NL001 | `forbidden-field-type` | `Node` subclass members | Forbids `String` data members |
//! | NL002 | `forbidden-static-field` | `Node` subclass members | Forbids non-const `static` data members |
//! | NL003 | `forbidden-logging-call` | whole file | Forbids `Serial.print*`/`write` unless marked `// ok-lint` |
//!
//! Type names, the logging receiver and the exemption marker all come from
//! [`ScanConfig`](node_lint_core::ScanConfig).
//!
//! ## Usage
//!
//! ```ignore
//! use node_lint_core::ScanConfig;
//! use node_lint_rules::default_scanner;
//!
//! let scanner = default_scanner(&ScanConfig::default())?;
//! let violations = scanner.scan(Path::new("src/Effects.h"), &content);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod forbidden_field_type;
mod forbidden_logging_call;
mod forbidden_static_field;
mod presets;

pub use forbidden_field_type::ForbiddenFieldType;
pub use forbidden_logging_call::ForbiddenLoggingCall;
pub use forbidden_static_field::ForbiddenStaticField;
pub use presets::{all_rules, default_scanner, filter_rules, rule_for};

/// Re-export core types for convenience.
pub use node_lint_core::{Rule, RuleKind, Violation};
