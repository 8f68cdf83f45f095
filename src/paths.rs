//! Centralized path definitions for resub
//!
//! ## Rules file lookup
//!
//! ```text
//! --config <path>               # explicit, always wins
//! ./resub.toml                  # project rules, next to the sources
//! ~/.resub/config.toml          # user-level fallback
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// Project-level paths
// =============================================================================

/// Project rules filename
pub const RESUB_TOML: &str = "resub.toml";

/// Get path to the project rules file in `dir`
#[must_use]
pub fn project_config(dir: &Path) -> PathBuf {
    dir.join(RESUB_TOML)
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global config directory name
const GLOBAL_DIR: &str = ".resub";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global resub directory.
///
/// Returns `~/.resub/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.resub/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}

/// Pick the rules file to use
///
/// An explicit path is returned as is, even if it does not exist, so the
/// caller reports the missing file rather than silently falling back.
#[must_use]
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    [project_config(cwd), global_config()].into_iter().find(|p| p.is_file())
}
