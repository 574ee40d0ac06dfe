//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "node-lint.toml";

const DEFAULT_CONFIG: &str = r#"# node-lint configuration

[analyzer]
# Source directory to scan, relative to this file
root = "src"

# File extensions to scan
extensions = ["cpp", "h"]

# Glob patterns to exclude from analysis
exclude = [
    "**/generated/**",
]

# Respect .gitignore files
respect_gitignore = true

[scan]
# Classes deriving from this type are checked
base_type = "Node"

# Member type that must not be stored in a Node subclass
forbidden_field_type = "String"

# Direct logging calls that bypass the log macros
logging_receiver = "Serial"
logging_methods = ["print", "println", "printf", "write"]

# `// ok-lint` exempts a line from forbidden-logging-call
exemption_marker = "ok-lint"

# Member declarations are indented by at most this many spaces
max_member_indent = 3

[rules.forbidden-field-type]
enabled = true

[rules.forbidden-static-field]
enabled = true

[rules.forbidden-logging-call]
enabled = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to point `root` at your sources");
    println!("  2. Run: node-lint check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}
