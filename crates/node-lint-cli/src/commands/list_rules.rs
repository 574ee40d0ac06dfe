//! List rules command implementation.

use anyhow::Result;
use node_lint_core::ScanConfig;
use node_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    let scan = ScanConfig::default();

    println!("Available rules:\n");
    println!("{:<8} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules(&scan)? {
        println!(
            "{:<8} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!(
        "\nMember rules apply to classes deriving from `{}`; lines marked `// {}` are exempt from logging checks.",
        scan.base_type, scan.exemption_marker
    );

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  node-lint check --rules forbidden-field-type,forbidden-static-field");
    println!("  node-lint check --rules NL001,NL003");

    Ok(())
}
