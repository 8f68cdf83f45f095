//! Message-to-log-level rewrite
//!
//! Legacy code fetches a localized message and hands it to a generic error
//! logger. The leveled logger takes the message key directly and the level is
//! implied by the key's catalog entry:
//!
//! ```text
//! LocalizableMessage message = WARN_DISK_LOW.get(path, free);
//! ...
//! logError(message);
//!
//!   becomes
//!
//! ...
//! logger.warn(WARN_DISK_LOW, path, free);
//! ```
//!
//! Phase 1 fuses a binding with the later `logError(var)` that consumes it.
//! Phase 2 rewrites the remaining `logError(KEY.get(..))` calls. A key with no
//! level in the [`LevelMap`] leaves its call site untouched; it is reported as
//! unresolved, never given a default level.

use std::collections::{BTreeSet, HashSet};
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::core::models::{Level, LevelMap};

/// `[final] LocalizableMessage var = KEY.get(args);` on its own line
static BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:final[ \t]+)?(?:LocalizableMessage|Message)[ \t]+(\w+)[ \t]*=[ \t]*([A-Z][A-Z0-9_]*)\.get\(((?s:.*?))\);[ \t]*(?:\r?\n)?",
    )
    .expect("binding pattern is valid")
});

/// `logError(var);`
static LOG_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:ErrorLogger\.)?\blogError\(\s*(\w+)\s*\)\s*;")
        .expect("log variable pattern is valid")
});

/// `logError(KEY.get(args));`
static LOG_DIRECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:ErrorLogger\.)?\blogError\(\s*([A-Z][A-Z0-9_]*)\.get\(((?s:.*?))\)\s*\)\s*;")
        .expect("direct log pattern is valid")
});

/// Result of running the rewrite over one file's content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelRewrite {
    /// Rewritten content
    pub content: String,
    /// Bindings fused in phase 1
    pub fused: usize,
    /// Direct calls rewritten in phase 2
    pub redirected: usize,
    /// Keys left alone because no level resolved
    pub unresolved: BTreeSet<String>,
}

impl LevelRewrite {
    /// Total number of call sites changed
    #[must_use]
    pub const fn changes(&self) -> usize {
        self.fused + self.redirected
    }
}

/// Two-phase rewriter over a read-only level table
#[derive(Debug, Clone, Copy)]
pub struct LevelRewriter<'a> {
    levels: &'a LevelMap,
}

impl<'a> LevelRewriter<'a> {
    /// Create a rewriter reading levels from `levels`
    #[must_use]
    pub const fn new(levels: &'a LevelMap) -> Self {
        Self { levels }
    }

    /// Run phase 1 then phase 2
    #[must_use]
    pub fn rewrite(&self, content: &str) -> LevelRewrite {
        let mut unresolved = BTreeSet::new();
        let (content, fused) = self.fuse_bindings(content, &mut unresolved);
        let (content, redirected) = self.redirect_direct_calls(&content, &mut unresolved);
        LevelRewrite {
            content,
            fused,
            redirected,
            unresolved,
        }
    }

    /// Phase 1: fuse `var = KEY.get(..)` with the `logError(var)` using it
    ///
    /// The consuming call is looked for between the binding and the next
    /// binding of the same variable. A binding is fused only when that call
    /// is the variable's sole use in the range.
    ///
    /// Scanning restarts at the fused binding's position after every fusion,
    /// so a binding exposed by the previous one is picked up, until no binding
    /// is left ahead of the cursor.
    pub fn fuse_bindings(&self, content: &str, unresolved: &mut BTreeSet<String>) -> (String, usize) {
        let mut content = content.to_string();
        let mut cursor = 0;
        let mut fused = 0;

        while let Some(binding) = BINDING.captures_at(&content, cursor) {
            let whole = binding.get(0).map_or(cursor..cursor, |m| m.range());
            let var = &binding[1];
            let key = &binding[2];
            let args = &binding[3];

            let scope_end = rebinding_start(&content, whole.end, var).unwrap_or(content.len());
            let scope = &content[whole.end..scope_end];

            let call = LOG_VARIABLE
                .captures_iter(scope)
                .find(|c| &c[1] == var)
                .and_then(|c| c.get(0))
                .map(|m| m.range());

            let Some(call) = call else {
                cursor = whole.end;
                continue;
            };

            let Some(level) = self.levels.level(key) else {
                unresolved.insert(key.to_string());
                cursor = whole.end;
                continue;
            };

            if used_outside(scope, var, &call) {
                log::debug!("binding of {key} to {var} has other uses, left alone");
                cursor = whole.end;
                continue;
            }

            let call = (whole.end + call.start)..(whole.end + call.end);
            let replacement = leveled_call(level, key, args);
            let mut next = String::with_capacity(content.len());
            next.push_str(&content[..whole.start]);
            next.push_str(&content[whole.end..call.start]);
            next.push_str(&replacement);
            next.push_str(&content[call.end..]);

            log::debug!("fused binding of {key} into logger.{level}");
            content = next;
            cursor = whole.start;
            fused += 1;
        }

        (content, fused)
    }

    /// Phase 2: rewrite `logError(KEY.get(..))` calls directly
    ///
    /// Each key is handled once per file; keys already handled (resolved or
    /// not) are skipped when looking for the next one.
    pub fn redirect_direct_calls(
        &self,
        content: &str,
        unresolved: &mut BTreeSet<String>,
    ) -> (String, usize) {
        let mut content = content.to_string();
        let mut seen: HashSet<String> = HashSet::new();
        let mut redirected = 0;

        loop {
            let next_key = LOG_DIRECT
                .captures_iter(&content)
                .map(|c| c[1].to_string())
                .find(|key| !seen.contains(key));
            let Some(key) = next_key else {
                break;
            };
            seen.insert(key.clone());

            let Some(level) = self.levels.level(&key) else {
                unresolved.insert(key);
                continue;
            };

            let mut count = 0;
            let rewritten = LOG_DIRECT.replace_all(&content, |caps: &Captures<'_>| {
                if caps[1] == key {
                    count += 1;
                    leveled_call(level, &key, &caps[2])
                } else {
                    caps[0].to_string()
                }
            });
            let rewritten = rewritten.into_owned();

            log::debug!("redirected {count} call(s) of {key} to logger.{level}");
            content = rewritten;
            redirected += count;
        }

        (content, redirected)
    }
}

/// Start of the next binding of `var` at or after `from`
fn rebinding_start(content: &str, from: usize, var: &str) -> Option<usize> {
    let mut at = from;
    while let Some(next) = BINDING.captures_at(content, at) {
        let range = next.get(0)?.range();
        if &next[1] == var {
            return Some(range.start);
        }
        at = range.end;
    }
    None
}

/// Whether `var` appears in `scope` anywhere but inside `call`
fn used_outside(scope: &str, var: &str, call: &Range<usize>) -> bool {
    let Ok(word) = Regex::new(&format!(r"\b{}\b", regex::escape(var))) else {
        return true;
    };
    word.find_iter(scope)
        .any(|m| m.start() < call.start || m.end() > call.end)
}

/// `logger.<level>(KEY[, args]);`
fn leveled_call(level: Level, key: &str, args: &str) -> String {
    let args = args.trim();
    if args.is_empty() {
        format!("logger.{}({key});", level.method())
    } else {
        format!("logger.{}({key}, {args});", level.method())
    }
}
