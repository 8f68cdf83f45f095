//! Command implementations

mod check;
mod levels;
mod list;
mod run;
mod select;

use std::path::Path;

use resub::config::Config;
use resub::paths;

pub use check::check;
pub use levels::levels;
pub use list::list;
pub use run::run;
pub use select::select;

/// Locate and parse the rules file
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let cwd = std::env::current_dir()?;
    let Some(path) = paths::resolve_config(explicit, &cwd) else {
        anyhow::bail!(
            "no {} found in {} (pass --config <path>)",
            paths::RESUB_TOML,
            cwd.display()
        );
    };
    log::debug!("using rules file {}", path.display());
    Ok(Config::load(&path)?)
}
