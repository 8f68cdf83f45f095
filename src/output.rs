//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::collections::BTreeSet;
use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::core::error::FileAccessError;
use crate::core::models::{ApplyMode, Level, RuleSet, RuleSetKind, RunSummary};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a rewrite run
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Per rule set results, in run order
    pub rulesets: Vec<RuleSetReport>,
    /// Sum over every rule set
    #[serde(flatten)]
    pub total: RunSummary,
    /// Whether files were left untouched
    pub dry_run: bool,
}

/// Result of one rule set
#[derive(Debug, Serialize)]
pub struct RuleSetReport {
    /// Rule set name
    pub name: String,
    /// Counters
    #[serde(flatten)]
    pub summary: RunSummary,
    /// Files that changed
    pub files: Vec<FileChange>,
    /// Files that could not be processed
    pub failures: Vec<FileFailure>,
    /// Message keys without a level; their call sites were kept
    pub unresolved_keys: BTreeSet<String>,
}

/// A changed file
#[derive(Debug, Serialize)]
pub struct FileChange {
    /// File path
    pub path: PathBuf,
    /// Substitutions applied
    pub substitutions: usize,
}

/// A file that was skipped because of an error
#[derive(Debug, Serialize)]
pub struct FileFailure {
    /// File path
    pub path: PathBuf,
    /// What went wrong
    pub error: String,
}

impl From<&FileAccessError> for FileFailure {
    fn from(error: &FileAccessError) -> Self {
        Self {
            path: error.path().to_path_buf(),
            error: error.to_string(),
        }
    }
}

impl RuleSetReport {
    /// Empty report for a rule set
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: RunSummary::default(),
            files: Vec::new(),
            failures: Vec::new(),
            unresolved_keys: BTreeSet::new(),
        }
    }
}

impl RunReport {
    /// Number of files that failed across all rule sets
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.rulesets.iter().map(|r| r.failures.len()).sum()
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.rulesets.is_empty() {
            println!("No rule sets to run.");
            return;
        }

        for r in &self.rulesets {
            println!("{}", format!("[{}]", r.name).bold());
            for f in &r.files {
                println!("  {} ({})", f.path.display(), f.substitutions);
            }
            for f in &r.failures {
                println!("  {} {}", "failed:".red(), f.error);
            }
            if !r.unresolved_keys.is_empty() {
                println!(
                    "  {} {}",
                    "no level for:".yellow(),
                    r.unresolved_keys.iter().cloned().collect::<Vec<_>>().join(", ")
                );
            }
            println!(
                "  {} file(s) changed, {} substitution(s)\n",
                r.summary.files_changed, r.summary.total_substitutions
            );
        }

        let verb = if self.dry_run { "Would change" } else { "Changed" };
        let line = format!(
            "{verb} {} file(s), {} substitution(s)",
            self.total.files_changed, self.total.total_substitutions
        );
        if self.failure_count() == 0 {
            println!("{}", line.green());
        } else {
            println!("{} ({} file(s) failed)", line.yellow(), self.failure_count());
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Result of listing rule sets
#[derive(Debug, Serialize)]
pub struct RuleSetListResult {
    /// Configured rule sets
    pub rulesets: Vec<RuleSetInfo>,
}

/// Summary of a configured rule set
#[derive(Debug, Serialize)]
pub struct RuleSetInfo {
    /// Rule set name
    pub name: String,
    /// Kind
    pub kind: RuleSetKind,
    /// Application mode
    pub mode: ApplyMode,
    /// Root directories
    pub dirs: Vec<PathBuf>,
    /// Accepted suffixes
    pub extensions: Vec<String>,
    /// Number of rules
    pub rules: usize,
}

impl From<&RuleSet> for RuleSetInfo {
    fn from(ruleset: &RuleSet) -> Self {
        Self {
            name: ruleset.name().to_string(),
            kind: ruleset.kind(),
            mode: ruleset.mode(),
            dirs: ruleset.directories().to_vec(),
            extensions: ruleset.extensions().to_vec(),
            rules: ruleset.rules().len(),
        }
    }
}

impl RuleSetListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.rulesets.is_empty() {
            println!("No rule sets configured.");
            return;
        }

        for r in &self.rulesets {
            println!("{} ({}, {})", r.name.bold(), r.kind, r.mode);
            let dirs: Vec<_> = r.dirs.iter().map(|d| d.display().to_string()).collect();
            println!("  dirs: {}", dirs.join(", "));
            println!("  extensions: {}", r.extensions.join(", "));
            println!("  rules: {}\n", r.rules);
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Files a rule set would touch
#[derive(Debug, Serialize)]
pub struct SelectionResult {
    /// Rule set name
    pub ruleset: String,
    /// Selected files in traversal order
    pub files: Vec<PathBuf>,
    /// Traversal errors
    pub failures: Vec<FileFailure>,
}

impl SelectionResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        for f in &self.files {
            println!("{}", f.display());
        }
        for f in &self.failures {
            eprintln!("{} {}", "failed:".red(), f.error);
        }
        eprintln!("{} file(s) selected by '{}'", self.files.len(), self.ruleset);
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Message keys and the levels they resolve to
#[derive(Debug, Serialize)]
pub struct LevelListResult {
    /// Entries sorted by key
    pub entries: Vec<LevelEntry>,
}

/// One message key
#[derive(Debug, Serialize)]
pub struct LevelEntry {
    /// Lookup key as it appears in source
    pub key: String,
    /// Resolved level, if any
    pub level: Option<Level>,
}

impl LevelListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.entries.is_empty() {
            println!("No message keys found.");
            return;
        }

        for e in &self.entries {
            match e.level {
                Some(level) => println!("{:<6} {}", level.method(), e.key),
                None => println!("{:<6} {}", "-", e.key),
            }
        }
        let unresolved = self.entries.iter().filter(|e| e.level.is_none()).count();
        println!("\n{} key(s), {} without a level", self.entries.len(), unresolved);
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
