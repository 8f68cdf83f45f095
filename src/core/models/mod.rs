//! Domain models for rewrite runs
//!
//! Pure data types with no I/O dependencies.

mod level;
pub mod level_map;
mod rule;
mod rule_set;
mod summary;

pub use level::Level;
pub use level_map::LevelMap;
pub use rule::{Rule, RuleError};
pub use rule_set::{ApplyMode, DEFAULT_PLACEHOLDER, RuleSet, RuleSetBuilder, RuleSetKind};
pub use summary::RunSummary;
