//! Rule sets and lookup.

use crate::{ForbiddenFieldType, ForbiddenLoggingCall, ForbiddenStaticField};
use node_lint_core::{RuleBox, RuleError, RuleKind, ScanConfig, Scanner};

/// Builds the rule implementing `kind`.
///
/// # Errors
///
/// Returns an error if the rule's pattern fails to compile.
pub fn rule_for(kind: RuleKind, config: &ScanConfig) -> Result<RuleBox, RuleError> {
    Ok(match kind {
        RuleKind::ForbiddenFieldType => Box::new(ForbiddenFieldType::new(config)?),
        RuleKind::ForbiddenStaticField => Box::new(ForbiddenStaticField::new(config)?),
        RuleKind::ForbiddenLoggingCall => Box::new(ForbiddenLoggingCall::new(config)?),
    })
}

/// Returns all available rules, in evaluation order.
///
/// # Errors
///
/// Returns an error if a rule's pattern fails to compile.
pub fn all_rules(config: &ScanConfig) -> Result<Vec<RuleBox>, RuleError> {
    RuleKind::ALL
        .into_iter()
        .map(|kind| rule_for(kind, config))
        .collect()
}

/// Returns the rules named by `names` (rule names or codes).
///
/// Unknown names are logged and skipped. The result is always in evaluation
/// order, whatever order the names were given in.
///
/// # Errors
///
/// Returns an error if a rule's pattern fails to compile.
pub fn filter_rules(names: &[&str], config: &ScanConfig) -> Result<Vec<RuleBox>, RuleError> {
    let mut kinds: Vec<RuleKind> = names
        .iter()
        .filter_map(|name| {
            let kind = RuleKind::from_name_or_code(name);
            if kind.is_none() {
                tracing::warn!("Unknown rule: {}", name);
            }
            kind
        })
        .collect();
    kinds.sort();
    kinds.dedup();

    kinds.into_iter().map(|kind| rule_for(kind, config)).collect()
}

/// Builds a scanner running every rule.
///
/// # Errors
///
/// Returns an error if a pattern fails to compile.
pub fn default_scanner(config: &ScanConfig) -> Result<Scanner, RuleError> {
    Scanner::new(config, all_rules(config)?)
}
