//! Run command - apply rule sets in place

use std::path::{Path, PathBuf};

use resub::adapters::{AtomicFiles, GitStatus};
use resub::core::error::ConfigurationError;
use resub::core::models::RuleSet;
use resub::core::services::RewriteEngine;
use resub::output::OutputMode;
use resub::runner::{self, Runner, Targets};

use super::load_config;

/// Apply the configured rule sets
///
/// Everything that can make the configuration unusable is checked before the
/// first file is read: patterns, templates, directories and message catalogs.
pub fn run(
    config_path: Option<&Path>,
    files: Vec<PathBuf>,
    all: bool,
    dry_run: bool,
    only: &[String],
    mode: OutputMode,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let rulesets = restrict(config.rule_sets()?, only)?;
    runner::preflight(&rulesets)?;
    let levels = config.level_map()?;

    let targets = Targets::resolve(files, all, &GitStatus::current_dir()?)?;
    if dry_run {
        log::info!("dry run: no file will be written");
    }

    let source_files = AtomicFiles::new();
    let engine = RewriteEngine::new(&source_files, &levels).max_passes(config.settings.max_passes);
    let report = Runner::new(engine, dry_run).run(&rulesets, &targets)?;

    report.render(mode);
    Ok(())
}

/// Keep only the named rule sets, in declared order
fn restrict(rulesets: Vec<RuleSet>, only: &[String]) -> Result<Vec<RuleSet>, ConfigurationError> {
    if only.is_empty() {
        return Ok(rulesets);
    }
    if let Some(unknown) = only.iter().find(|name| !rulesets.iter().any(|r| r.name() == *name)) {
        return Err(ConfigurationError::Invalid(format!("no rule set named '{unknown}'")));
    }
    Ok(rulesets.into_iter().filter(|r| only.iter().any(|name| name == r.name())).collect())
}
