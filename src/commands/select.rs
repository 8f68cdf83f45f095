//! Select command - show which files a rule set would touch

use std::path::Path;

use resub::output::{FileFailure, OutputMode, SelectionResult};
use resub::selector::FileSelector;

use super::load_config;

/// Print the files selected by one rule set
pub fn select(config_path: Option<&Path>, name: &str, mode: OutputMode) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let rulesets = config.rule_sets()?;
    let Some(ruleset) = rulesets.iter().find(|r| r.name() == name) else {
        anyhow::bail!("no rule set named '{name}'");
    };

    let mut result = SelectionResult {
        ruleset: name.to_string(),
        files: Vec::new(),
        failures: Vec::new(),
    };
    for selected in FileSelector::select(ruleset)? {
        match selected {
            Ok(path) => result.files.push(path),
            Err(error) => result.failures.push(FileFailure::from(&error)),
        }
    }

    result.render(mode);
    Ok(())
}
