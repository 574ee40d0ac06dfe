//! Output formatting for lint results.

use anyhow::Result;
use node_lint_core::{LintResult, Violation, ViolationDiagnostic};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Pretty => print_pretty(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
    print_summary(result);
}

/// Violations go to stdout; the failure count goes to stderr so that piping
/// the report keeps only the findings.
fn print_summary(result: &LintResult) {
    if result.has_violations() {
        eprintln!("\n{}", result.summary());
    } else {
        println!("{}", result.summary());
    }
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{}", violation.format());
    }

    for (rule, count) in result.count_by_rule() {
        println!("{:<7} {:<25} {count}", rule.code(), rule.name());
    }
    print_summary(result);
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_pretty(result: &LintResult) {
    let mut source: Option<(&Path, String)> = None;

    for violation in &result.violations {
        let file = violation.location.file.as_path();
        if source.as_ref().map(|(path, _)| *path) != Some(file) {
            source = std::fs::read(file)
                .ok()
                .map(|bytes| (file, String::from_utf8_lossy(&bytes).into_owned()));
        }

        match &source {
            Some((_, content)) => println!("{}", render_snippet(violation, content)),
            None => println!("{violation}"),
        }
    }
    print_summary(result);
}

fn render_snippet(violation: &Violation, content: &str) -> String {
    let name = violation.location.file.display().to_string();
    let report = miette::Report::new(ViolationDiagnostic::from(violation))
        .with_source_code(miette::NamedSource::new(name, content.to_owned()));
    format!("{report:?}")
}
