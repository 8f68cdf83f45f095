//! Message key to log level lookup table
//!
//! Built once per run from property-style message catalogs and read-only
//! afterwards. Keys are the identifiers as they appear at call sites, which
//! differ from the catalog keys: severity qualifiers are folded away and the
//! trailing ordinal is dropped.
//!
//! ```text
//! SEVERE_WARN_FOO_BAR_42=some text   ->   WARN_FOO_BAR => warn
//! ```

use std::collections::BTreeMap;

use super::Level;

/// Qualifiers removed from catalog keys, in this order
pub const SEVERITY_QUALIFIERS: [&str; 3] = ["SEVERE_", "FATAL_", "MILD_"];

/// Key prefixes reserved for catalog-wide settings rather than messages
pub const DEFAULT_RESERVED_PREFIXES: [&str; 1] = ["GLOBAL"];

/// Read-only `{key -> level}` table
///
/// A key may be present with no level; call sites using it are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelMap {
    entries: BTreeMap<String, Option<Level>>,
}

impl LevelMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key; a later insert for the same key wins
    pub fn insert(&mut self, key: impl Into<String>, level: Option<Level>) {
        self.entries.insert(key.into(), level);
    }

    /// Level for `key`, if the key is known and resolved
    #[must_use]
    pub fn level(&self, key: &str) -> Option<Level> {
        self.entries.get(key).copied().flatten()
    }

    /// Whether `key` was seen in the catalogs at all
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<Level>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Add every level-bearing entry of one catalog
    ///
    /// Lines following a line that ends in `\` are value continuations and
    /// are skipped along with indented lines.
    pub fn extend_from_properties(&mut self, content: &str, reserved_prefixes: &[String]) {
        let mut continued = false;
        for line in content.lines() {
            let was_continued = continued;
            continued = line.trim_end().ends_with('\\');
            if was_continued {
                continue;
            }
            if let Some((key, level)) = derive_entry(line, reserved_prefixes) {
                self.insert(key, level);
            }
        }
    }
}

impl FromIterator<(String, Option<Level>)> for LevelMap {
    fn from_iter<T: IntoIterator<Item = (String, Option<Level>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Derive `(lookup key, level)` from one catalog line
///
/// Returns `None` for lines that carry no message: blanks, `#` comments,
/// indented continuations, keys not starting with an uppercase letter, and
/// keys under a reserved prefix.
#[must_use]
pub fn derive_entry(line: &str, reserved_prefixes: &[String]) -> Option<(String, Option<Level>)> {
    if line.trim().is_empty() || line.starts_with('#') {
        return None;
    }
    if !line.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return None;
    }
    let (raw_key, _) = line.split_once('=')?;
    let raw_key = raw_key.trim();
    if reserved_prefixes.iter().any(|p| raw_key.starts_with(p.as_str())) {
        return None;
    }

    Some((lookup_key(raw_key), resolve_level(raw_key)))
}

/// Resolve the severity tag of a catalog key
///
/// The first segment is used alone when it is a bare tag, otherwise it is
/// combined with the second (`SEVERE` + `WARN`).
#[must_use]
pub fn resolve_level(raw_key: &str) -> Option<Level> {
    let mut segments = raw_key.split('_');
    let first = segments.next()?;
    if Level::is_bare_tag(first) {
        return Level::from_tag(first);
    }
    let second = segments.next()?;
    Level::from_tag(&format!("{first}_{second}"))
}

/// Reconstruct the call-site key from a catalog key
///
/// Qualifiers are removed by plain substring replacement in
/// [`SEVERITY_QUALIFIERS`] order, then a trailing all-digit segment goes.
#[must_use]
pub fn lookup_key(raw_key: &str) -> String {
    let mut key = raw_key.to_string();
    for qualifier in SEVERITY_QUALIFIERS {
        key = key.replace(qualifier, "");
    }
    if let Some((head, tail)) = key.rsplit_once('_') {
        if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
            key.truncate(head.len());
        }
    }
    key
}
