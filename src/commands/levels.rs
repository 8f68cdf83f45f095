//! Levels command - dump the message key to level table

use std::path::Path;

use resub::adapters::LevelMapBuilder;
use resub::output::{LevelEntry, LevelListResult, OutputMode};

use super::load_config;

/// Show every message key and the level it resolves to
pub fn levels(config_path: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let Some(dir) = config.messages_dir() else {
        anyhow::bail!("no messages_dir configured in [settings]");
    };

    let map = LevelMapBuilder::new()
        .reserved_prefixes(config.settings.reserved_prefixes.clone())
        .build_from_dir(&dir)?;

    let result = LevelListResult {
        entries: map
            .iter()
            .map(|(key, level)| LevelEntry {
                key: key.to_string(),
                level,
            })
            .collect(),
    };
    result.render(mode);
    Ok(())
}
