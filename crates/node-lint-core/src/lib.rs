//! # node-lint-core
//!
//! Core framework for line-oriented C++ style linting.
//!
//! node-lint does not build a syntax tree. It reconstructs just enough
//! structure from each line to decide whether a rule applies:
//!
//! - [`sanitize_line`] empties literals and drops trailing `//` comments
//! - [`ScanState`] tracks brace depth and the stack of open class frames
//! - [`MemberLevelContext`] tells whether a line sits at member level of a
//!   class deriving from the configured base type
//! - [`Rule`] implementations inspect a [`LineContext`] and yield violations
//! - [`Scanner`] runs that pipeline over one file
//! - [`Analyzer`] discovers files and aggregates a [`LintResult`]
//!
//! ## Example
//!
//! ```ignore
//! use node_lint_core::{Analyzer, Config};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .config(Config::default())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod member;
mod rule;
mod sanitize;
mod scanner;
mod scope;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, ScanConfig};
pub use context::LineContext;
pub use member::MemberLevelContext;
pub use rule::{Rule, RuleBox, RuleError};
pub use sanitize::{count_braces, sanitize_line};
pub use scanner::Scanner;
pub use scope::{derives_from, ClassDecl, ClassMatcher, ScanState, ScopeFrame};
pub use types::{
    LintResult, Location, RuleKind, Suggestion, Violation, ViolationDiagnostic,
};
