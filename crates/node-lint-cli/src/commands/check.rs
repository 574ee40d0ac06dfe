//! Check command implementation.

use anyhow::{Context, Result};
use node_lint_core::{Analyzer, Config};
use node_lint_rules::{all_rules, filter_rules};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::{OutputFormat, Outcome};

/// Arguments of the check command.
pub struct CheckArgs {
    /// Project directory (`PATH`).
    pub project: PathBuf,
    /// Source directory override (`--src`).
    pub src: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule filter.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Resolved configuration file.
    pub source: ConfigSource,
}

/// Runs the check command.
pub fn run(args: &CheckArgs) -> Result<Outcome> {
    let config = load_config(&args.source)?;
    let root = scan_root(
        args.src.as_deref(),
        &args.project,
        &args.source,
        &config,
    );

    let rules = match &args.rules {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(&names, &config.scan)
        }
        None => all_rules(&config.scan),
    }
    .context("Failed to build rules")?;

    let mut builder = Analyzer::builder()
        .root(&root)
        .excludes(args.exclude.iter().cloned());
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    let analyzer = builder
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        root.display(),
        analyzer.rule_count()
    );

    let result = analyzer
        .analyze()
        .with_context(|| format!("Analysis of {} failed", root.display()))?;

    super::output::print(&result, args.format)?;

    Ok(if result.has_violations() {
        Outcome::Violations
    } else {
        Outcome::Clean
    })
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };

    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Picks the directory to scan.
///
/// `--src` is taken as given. A relative configured root is anchored at the
/// directory holding a project config file, and at the project directory
/// otherwise.
fn scan_root(
    src: Option<&Path>,
    project: &Path,
    source: &ConfigSource,
    config: &Config,
) -> PathBuf {
    if let Some(src) = src {
        return src.to_path_buf();
    }

    let root = &config.analyzer.root;
    if root.is_absolute() {
        return root.clone();
    }

    let base = match source {
        ConfigSource::Project(file) => file.parent(),
        _ => Some(project),
    };
    base.filter(|dir| *dir != Path::new(".") && !dir.as_os_str().is_empty())
        .map_or_else(|| root.clone(), |dir| dir.join(root))
}
