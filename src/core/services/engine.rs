//! Rewrite engine: applies a rule set to one file
//!
//! Each rule is a pure step `content -> content'` over an immutable snapshot,
//! and a file's rewrite is the fold of its rule set's steps in declared order.
//! Only the final content is persisted, once, and only if it differs from
//! what was read.
//!
//! Counting follows the application mode:
//! - [`ApplyMode::Single`]: a rule that changed the content counts 1.
//! - [`ApplyMode::FixedPoint`]: every pass that changed the content counts 1.

use std::collections::BTreeSet;
use std::path::Path;

use super::level_rewrite::LevelRewriter;
use crate::core::error::FileAccessError;
use crate::core::models::{ApplyMode, LevelMap, Rule, RuleSet, RuleSetKind};
use crate::core::ports::SourceFiles;

/// Default bound on fixed-point passes per rule per file
pub const DEFAULT_MAX_PASSES: usize = 1000;

/// Outcome of one rule step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Content after the step
    pub content: String,
    /// Passes that changed the content
    pub substitutions: usize,
}

/// A rule kept changing the content past the pass bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassLimitReached(pub usize);

/// Apply one rule to `content` with an already expanded replacement
///
/// In fixed-point mode the rule is retried until a pass leaves the content
/// unchanged, up to `max_passes` changing passes.
pub fn apply_rule(
    rule: &Rule,
    mode: ApplyMode,
    content: &str,
    replacement: &str,
    max_passes: usize,
) -> Result<Step, PassLimitReached> {
    let mut current = content.to_string();
    let mut substitutions = 0;

    loop {
        let next = rule.replace_first(&current, replacement);
        if next == current {
            break;
        }
        current = next;
        substitutions += 1;

        match mode {
            ApplyMode::Single => break,
            ApplyMode::FixedPoint if substitutions >= max_passes => {
                if rule.replace_first(&current, replacement) != current {
                    return Err(PassLimitReached(max_passes));
                }
                break;
            },
            ApplyMode::FixedPoint => {},
        }
    }

    Ok(Step {
        content: current,
        substitutions,
    })
}

/// Result of rewriting one file's content in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    /// Final content
    pub content: String,
    /// Counter sum over every rule and level-rewrite phase
    pub substitutions: usize,
    /// Message keys whose call sites were left alone
    pub unresolved_keys: BTreeSet<String>,
}

/// What happened to one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOutcome {
    /// Substitutions applied (0 when the content ended up unchanged)
    pub substitutions: usize,
    /// Whether new content was persisted
    pub written: bool,
    /// Message keys whose call sites were left alone
    pub unresolved_keys: BTreeSet<String>,
}

/// Applies rule sets to files through a [`SourceFiles`] port
#[derive(Debug)]
pub struct RewriteEngine<'a, F: SourceFiles> {
    files: &'a F,
    levels: &'a LevelMap,
    max_passes: usize,
    dry_run: bool,
}

impl<'a, F: SourceFiles> RewriteEngine<'a, F> {
    /// Create an engine; `levels` is only consulted by log-level rule sets
    pub const fn new(files: &'a F, levels: &'a LevelMap) -> Self {
        Self {
            files,
            levels,
            max_passes: DEFAULT_MAX_PASSES,
            dry_run: false,
        }
    }

    /// Bound fixed-point iteration per rule per file
    #[must_use]
    pub const fn max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Compute outcomes without persisting anything
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Rewrite `content` as if it were the file at `path`
    ///
    /// The path only supplies the placeholder value (the file stem) and error
    /// context; nothing is read or written.
    pub fn rewrite_content(
        &self,
        ruleset: &RuleSet,
        path: &Path,
        content: &str,
    ) -> Result<Rewrite, FileAccessError> {
        let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        let mut current = content.to_string();
        let mut substitutions = 0;

        for rule in ruleset.rules() {
            let replacement = rule.expand(&stem);
            let step = apply_rule(rule, ruleset.mode(), &current, &replacement, self.max_passes)
                .map_err(|PassLimitReached(passes)| FileAccessError::NoFixedPoint {
                    path: path.to_path_buf(),
                    pattern: rule.pattern().to_string(),
                    passes,
                })?;
            current = step.content;
            substitutions += step.substitutions;
        }

        let mut unresolved_keys = BTreeSet::new();
        if ruleset.kind() == RuleSetKind::LogLevels {
            let rewrite = LevelRewriter::new(self.levels).rewrite(&current);
            substitutions += rewrite.changes();
            current = rewrite.content;
            unresolved_keys = rewrite.unresolved;
        }

        Ok(Rewrite {
            content: current,
            substitutions,
            unresolved_keys,
        })
    }

    /// Apply a rule set to one file, persisting the result if it changed
    pub fn apply(&self, ruleset: &RuleSet, path: &Path) -> Result<FileOutcome, FileAccessError> {
        let original = self.files.read(path)?;
        let rewrite = self.rewrite_content(ruleset, path, &original)?;

        if rewrite.content == original {
            return Ok(FileOutcome {
                substitutions: 0,
                written: false,
                unresolved_keys: rewrite.unresolved_keys,
            });
        }

        if !self.dry_run {
            self.files.write_back(path, &rewrite.content)?;
        }

        Ok(FileOutcome {
            substitutions: rewrite.substitutions,
            written: !self.dry_run,
            unresolved_keys: rewrite.unresolved_keys,
        })
    }
}
