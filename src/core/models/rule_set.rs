//! Rule sets: ordered rules plus a file-selection policy
//!
//! Rules run in declaration order, each against the output of the previous
//! one. The policy decides which files a rule set may touch: the file must
//! carry one of the extensions, must not contain any stoplist substring, and
//! if a whitelist is given must contain one of its substrings. The stoplist
//! always wins.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Rule;
use crate::core::error::ConfigurationError;

/// Default reserved placeholder token, replaced by the file stem
pub const DEFAULT_PLACEHOLDER: &str = "@CLASSNAME@";

/// How each rule is applied to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplyMode {
    /// One substitution attempt per rule
    #[default]
    Single,
    /// Repeat each rule until a pass changes nothing
    FixedPoint,
}

impl std::fmt::Display for ApplyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::FixedPoint => write!(f, "fixed-point"),
        }
    }
}

/// What a rule set does besides running its rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSetKind {
    /// Plain pattern/template rules
    #[default]
    Replace,
    /// Rules, then the two-phase message-to-log-level rewrite
    LogLevels,
}

impl std::fmt::Display for RuleSetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Replace => write!(f, "replace"),
            Self::LogLevels => write!(f, "log-levels"),
        }
    }
}

/// A named, ordered collection of rules plus a file-selection policy
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    rules: Vec<Rule>,
    directories: Vec<PathBuf>,
    extensions: Vec<String>,
    whitelist: Vec<String>,
    stoplist: Vec<String>,
    mode: ApplyMode,
    kind: RuleSetKind,
}

impl RuleSet {
    /// Start building a rule set
    #[must_use]
    pub fn builder(name: impl Into<String>) -> RuleSetBuilder {
        RuleSetBuilder::new(name)
    }

    /// Rule set name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in application order
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Root directories to walk
    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Accepted file suffixes, each with a leading `.`
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Substrings of which a path must contain at least one (if non-empty)
    #[must_use]
    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }

    /// Substrings that disqualify a path
    #[must_use]
    pub fn stoplist(&self) -> &[String] {
        &self.stoplist
    }

    /// Rule application mode
    #[must_use]
    pub const fn mode(&self) -> ApplyMode {
        self.mode
    }

    /// Rule set kind
    #[must_use]
    pub const fn kind(&self) -> RuleSetKind {
        self.kind
    }

    /// Whether the file name ends in one of the extensions
    #[must_use]
    pub fn has_extension(&self, path: &Path) -> bool {
        path.file_name()
            .map(|n| n.to_string_lossy())
            .is_some_and(|name| self.extensions.iter().any(|ext| name.ends_with(ext.as_str())))
    }

    /// Apply the stoplist/whitelist to a path relative to its root
    ///
    /// The path is matched as `/`-prefixed, so `/generated/` also hits a
    /// directory directly under the root. The stoplist is checked first and
    /// short-circuits.
    #[must_use]
    pub fn passes_filters(&self, relative: &Path) -> bool {
        let relative = relative.to_string_lossy();
        let path = if relative.starts_with('/') {
            relative.into_owned()
        } else {
            format!("/{relative}")
        };
        if self.stoplist.iter().any(|s| path.contains(s.as_str())) {
            return false;
        }
        self.whitelist.is_empty() || self.whitelist.iter().any(|s| path.contains(s.as_str()))
    }

    /// Full eligibility check for `path` found under `root`
    ///
    /// Only the part of `path` below `root` is seen by the filters, so where
    /// the tree itself lives does not change what is selected.
    #[must_use]
    pub fn admits(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.has_extension(path) && self.passes_filters(relative)
    }

    /// Fail if any declared directory is missing
    pub fn verify_directories(&self) -> Result<(), ConfigurationError> {
        match self.directories.iter().find(|dir| !dir.is_dir()) {
            Some(dir) => Err(ConfigurationError::MissingDirectory {
                ruleset: self.name.clone(),
                path: dir.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Builder for [`RuleSet`]
///
/// Rules are compiled in [`RuleSetBuilder::build`], so a bad pattern is
/// reported before anything runs.
#[derive(Debug, Clone)]
pub struct RuleSetBuilder {
    name: String,
    replacements: Vec<(String, String)>,
    directories: Vec<PathBuf>,
    extensions: Vec<String>,
    whitelist: Vec<String>,
    stoplist: Vec<String>,
    mode: ApplyMode,
    kind: RuleSetKind,
    placeholder: String,
}

impl RuleSetBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replacements: Vec::new(),
            directories: Vec::new(),
            extensions: Vec::new(),
            whitelist: Vec::new(),
            stoplist: Vec::new(),
            mode: ApplyMode::default(),
            kind: RuleSetKind::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    /// Append a pattern/template pair
    #[must_use]
    pub fn rule(mut self, pattern: impl Into<String>, template: impl Into<String>) -> Self {
        self.replacements.push((pattern.into(), template.into()));
        self
    }

    /// Add a root directory
    #[must_use]
    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directories.push(dir.into());
        self
    }

    /// Add an accepted suffix (`java` and `.java` are equivalent)
    #[must_use]
    pub fn extension(mut self, ext: &str) -> Self {
        let ext = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{ext}")
        };
        self.extensions.push(ext);
        self
    }

    /// Add a required substring
    #[must_use]
    pub fn whitelist(mut self, substring: impl Into<String>) -> Self {
        self.whitelist.push(substring.into());
        self
    }

    /// Add a forbidden substring
    #[must_use]
    pub fn stoplist(mut self, substring: impl Into<String>) -> Self {
        self.stoplist.push(substring.into());
        self
    }

    /// Set the application mode
    #[must_use]
    pub const fn mode(mut self, mode: ApplyMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the kind
    #[must_use]
    pub const fn kind(mut self, kind: RuleSetKind) -> Self {
        self.kind = kind;
        self
    }

    /// Override the placeholder token
    #[must_use]
    pub fn placeholder(mut self, token: impl Into<String>) -> Self {
        self.placeholder = token.into();
        self
    }

    /// Validate the policy and compile every rule
    pub fn build(self) -> Result<RuleSet, ConfigurationError> {
        if self.directories.is_empty() {
            return Err(self.missing("dirs"));
        }
        if self.extensions.is_empty() {
            return Err(self.missing("extensions"));
        }
        if self.replacements.is_empty() && self.kind == RuleSetKind::Replace {
            return Err(self.missing("replacements"));
        }

        let rules = self
            .replacements
            .iter()
            .map(|(pattern, template)| {
                Rule::new(pattern, template, &self.placeholder).map_err(|source| {
                    ConfigurationError::Rule {
                        ruleset: self.name.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleSet {
            name: self.name,
            rules,
            directories: self.directories,
            extensions: self.extensions,
            whitelist: self.whitelist,
            stoplist: self.stoplist,
            mode: self.mode,
            kind: self.kind,
        })
    }

    fn missing(&self, field: &'static str) -> ConfigurationError {
        ConfigurationError::MissingField {
            ruleset: self.name.clone(),
            field,
        }
    }
}
