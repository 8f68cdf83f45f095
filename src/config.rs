//! Rule file configuration
//!
//! Rule sets are declared in a TOML file:
//!
//! ```toml
//! [settings]
//! messages_dir = "src/messages"
//!
//! [[ruleset]]
//! name = "imports"
//! dirs = ["src"]
//! extensions = ["java"]
//! stoplist = ["/generated/"]
//! replacements = [
//!   ['import org\.old\.(\w+);', 'import org.new.\1;'],
//! ]
//! ```
//!
//! Relative directories resolve against the directory holding the file.
//! Converting to [`RuleSet`]s compiles every rule, so a bad pattern is a
//! configuration error raised before any file is touched.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::adapters::LevelMapBuilder;
use crate::core::error::ConfigurationError;
use crate::core::models::level_map::DEFAULT_RESERVED_PREFIXES;
use crate::core::models::{ApplyMode, DEFAULT_PLACEHOLDER, LevelMap, RuleSet, RuleSetKind};
use crate::core::services::DEFAULT_MAX_PASSES;

/// A parsed rules file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Run-wide settings
    #[serde(default)]
    pub settings: Settings,

    /// Rule sets in declaration order
    #[serde(default, rename = "ruleset")]
    pub rulesets: Vec<RuleSetEntry>,

    /// Directory relative paths resolve against
    #[serde(skip)]
    base_dir: PathBuf,
}

/// Run-wide settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Placeholder token replaced by the file stem in templates
    pub placeholder: String,

    /// Directory of message catalogs for log-level rule sets
    pub messages_dir: Option<PathBuf>,

    /// Catalog key prefixes that are not messages
    pub reserved_prefixes: Vec<String>,

    /// Bound on fixed-point passes per rule per file
    pub max_passes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            messages_dir: None,
            reserved_prefixes: DEFAULT_RESERVED_PREFIXES.iter().map(ToString::to_string).collect(),
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// One `[[ruleset]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSetEntry {
    /// Rule set name
    pub name: String,

    /// Root directories
    #[serde(default)]
    pub dirs: Vec<PathBuf>,

    /// Accepted file suffixes
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Ordered pattern/template pairs
    #[serde(default)]
    pub replacements: Vec<Replacement>,

    /// Disqualifying path substrings
    #[serde(default)]
    pub stoplist: Vec<String>,

    /// Required path substrings
    #[serde(default)]
    pub whitelist: Vec<String>,

    /// Rule application mode
    #[serde(default)]
    pub mode: ApplyMode,

    /// Rule set kind
    #[serde(default)]
    pub kind: RuleSetKind,
}

/// A replacement written either as `[pattern, template]` or as a table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Replacement {
    /// `["pattern", "template"]`
    Pair(String, String),
    /// `{ pattern = "...", template = "..." }`
    Table {
        /// Regular expression
        pattern: String,
        /// Replacement template
        template: String,
    },
}

impl Replacement {
    /// The pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Pair(pattern, _) | Self::Table { pattern, .. } => pattern,
        }
    }

    /// The template
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            Self::Pair(_, template) | Self::Table { template, .. } => template,
        }
    }
}

impl Config {
    /// Load and parse a rules file
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&content, base_dir).map_err(|source| ConfigurationError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse rules file content; relative paths resolve against `base_dir`
    pub fn parse(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        config.base_dir = base_dir.into();
        Ok(config)
    }

    /// Directory relative paths resolve against
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolved message catalog directory, if configured
    #[must_use]
    pub fn messages_dir(&self) -> Option<PathBuf> {
        self.settings.messages_dir.as_deref().map(|dir| self.resolve(dir))
    }

    /// Whether any rule set needs the level map
    #[must_use]
    pub fn needs_levels(&self) -> bool {
        self.rulesets.iter().any(|r| r.kind == RuleSetKind::LogLevels)
    }

    /// Build validated rule sets in declaration order
    ///
    /// Checks settings, name uniqueness and that log-level rule sets have a
    /// catalog directory, then compiles every rule.
    pub fn rule_sets(&self) -> Result<Vec<RuleSet>, ConfigurationError> {
        if self.settings.max_passes == 0 {
            return Err(ConfigurationError::Invalid("max_passes must be at least 1".into()));
        }

        let mut names = HashSet::new();
        for entry in &self.rulesets {
            if !names.insert(entry.name.as_str()) {
                return Err(ConfigurationError::Invalid(format!(
                    "duplicate rule set name '{}'",
                    entry.name
                )));
            }
            if entry.kind == RuleSetKind::LogLevels && self.settings.messages_dir.is_none() {
                return Err(ConfigurationError::MissingMessagesDir(entry.name.clone()));
            }
        }

        self.rulesets.iter().map(|entry| self.build(entry)).collect()
    }

    /// Load the level map if any rule set needs it, otherwise an empty one
    pub fn level_map(&self) -> Result<LevelMap, ConfigurationError> {
        if !self.needs_levels() {
            return Ok(LevelMap::new());
        }
        let Some(dir) = self.messages_dir() else {
            let name = self
                .rulesets
                .iter()
                .find(|r| r.kind == RuleSetKind::LogLevels)
                .map(|r| r.name.clone())
                .unwrap_or_default();
            return Err(ConfigurationError::MissingMessagesDir(name));
        };
        LevelMapBuilder::new()
            .reserved_prefixes(self.settings.reserved_prefixes.clone())
            .build_from_dir(&dir)
    }

    fn build(&self, entry: &RuleSetEntry) -> Result<RuleSet, ConfigurationError> {
        let mut builder = RuleSet::builder(&entry.name)
            .mode(entry.mode)
            .kind(entry.kind)
            .placeholder(&self.settings.placeholder);
        for dir in &entry.dirs {
            builder = builder.directory(self.resolve(dir));
        }
        for ext in &entry.extensions {
            builder = builder.extension(ext);
        }
        for replacement in &entry.replacements {
            builder = builder.rule(replacement.pattern(), replacement.template());
        }
        for s in &entry.stoplist {
            builder = builder.stoplist(s);
        }
        for s in &entry.whitelist {
            builder = builder.whitelist(s);
        }
        builder.build()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
