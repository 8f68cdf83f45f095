//! List command - show configured rule sets

use std::path::Path;

use resub::output::{OutputMode, RuleSetInfo, RuleSetListResult};

use super::load_config;

/// List rule sets with their policies and rule counts
pub fn list(config_path: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let rulesets = config.rule_sets()?;

    let result = RuleSetListResult {
        rulesets: rulesets.iter().map(RuleSetInfo::from).collect(),
    };
    result.render(mode);
    Ok(())
}
