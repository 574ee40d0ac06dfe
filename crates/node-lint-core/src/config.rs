//! Configuration types for node-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::types::RuleKind;

/// Top-level configuration for node-lint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// File discovery configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Identifiers the line rules look for.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Per-rule configurations, keyed by rule name or code.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or names an unknown rule.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

        if let Some(unknown) = config
            .rules
            .keys()
            .find(|key| RuleKind::from_name_or_code(key).is_none())
        {
            return Err(ConfigError::UnknownRule(unknown.clone()));
        }

        Ok(config)
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule: RuleKind) -> bool {
        self.rules
            .iter()
            .filter(|(key, _)| RuleKind::from_name_or_code(key) == Some(rule))
            .all(|(_, c)| c.enabled.unwrap_or(true))
    }
}

/// File discovery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Directory to scan, relative to the working directory (default: `src`).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// File extensions to scan, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extensions: default_extensions(),
            exclude: Vec::new(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("src")
}

fn default_extensions() -> Vec<String> {
    vec!["cpp".to_string(), "h".to_string()]
}

fn default_true() -> bool {
    true
}

/// Identifiers and limits used by the scanner and its rules.
///
/// Passed by value into the scanner; nothing here is process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Base type whose subclasses are checked (default: `Node`).
    pub base_type: String,
    /// Type forbidden as a data member (default: `String`).
    pub forbidden_field_type: String,
    /// Receiver of forbidden logging calls (default: `Serial`).
    pub logging_receiver: String,
    /// Forbidden methods on the logging receiver.
    pub logging_methods: Vec<String>,
    /// Comment token exempting a line from the logging rule (default: `ok-lint`).
    pub exemption_marker: String,
    /// Most leading whitespace characters a member declaration may have.
    pub max_member_indent: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_type: "Node".to_string(),
            forbidden_field_type: "String".to_string(),
            logging_receiver: "Serial".to_string(),
            logging_methods: ["print", "println", "printf", "write"]
                .into_iter()
                .map(String::from)
                .collect(),
            exemption_marker: "ok-lint".to_string(),
            max_member_indent: 3,
        }
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A `[rules.<name>]` table names no known rule.
    #[error("Unknown rule in config: {0}")]
    UnknownRule(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analyzer.root, PathBuf::from("src"));
        assert_eq!(config.analyzer.extensions, vec!["cpp", "h"]);
        assert!(config.analyzer.respect_gitignore);
        assert_eq!(config.scan.base_type, "Node");
        assert_eq!(config.scan.logging_methods.len(), 4);
        assert!(RuleKind::ALL.iter().all(|r| config.is_rule_enabled(*r)));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./firmware"
exclude = ["**/generated/**"]

[scan]
base_type = "Module"
logging_methods = ["println"]

[rules.forbidden-static-field]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./firmware"));
        assert_eq!(config.analyzer.extensions, vec!["cpp", "h"]);
        assert_eq!(config.scan.base_type, "Module");
        assert_eq!(config.scan.forbidden_field_type, "String");
        assert_eq!(config.scan.logging_methods, vec!["println"]);
        assert!(!config.is_rule_enabled(RuleKind::ForbiddenStaticField));
        assert!(config.is_rule_enabled(RuleKind::ForbiddenFieldType));
    }

    #[test]
    fn rules_can_be_keyed_by_code() {
        let config = Config::parse("[rules.NL003]\nenabled = false\n").expect("parse");
        assert!(!config.is_rule_enabled(RuleKind::ForbiddenLoggingCall));
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let err = Config::parse("[rules.no-such-rule]\nenabled = true\n").expect_err("reject");
        assert!(matches!(err, ConfigError::UnknownRule(name) if name == "no-such-rule"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::parse("[analyzer\nroot = 1").expect_err("reject");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
