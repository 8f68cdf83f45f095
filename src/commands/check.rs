//! Check command - validate the rules file

use std::path::Path;

use resub::output::{OperationResult, OutputMode};
use resub::runner;

use super::load_config;

/// Run every pre-flight check without reading or writing sources
pub fn check(config_path: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let rulesets = config.rule_sets()?;
    runner::preflight(&rulesets)?;
    let levels = config.level_map()?;

    let rules: usize = rulesets.iter().map(|r| r.rules().len()).sum();
    let message = if config.needs_levels() {
        format!(
            "OK: {} rule set(s), {rules} rule(s), {} message key(s)",
            rulesets.len(),
            levels.len()
        )
    } else {
        format!("OK: {} rule set(s), {rules} rule(s)", rulesets.len())
    };

    OperationResult {
        success: true,
        message,
    }
    .render(mode);
    Ok(())
}
