//! A single pattern/replacement rule
//!
//! Templates use the classic `\1`..`\9` back-reference syntax. They are
//! translated once, at construction, into the `${n}` form the `regex` crate
//! expands, so a literal `$` in a template stays literal.
//!
//! # Examples
//!
//! ```
//! use resub::core::models::Rule;
//!
//! let rule = Rule::new(r"import old\.(\w+);", r"import new.\1;", "@CLASSNAME@").unwrap();
//! let template = rule.expand("Widget");
//! assert_eq!(
//!     rule.replace_first("import old.Foo;", &template),
//!     "import new.Foo;"
//! );
//! ```

use std::fmt;

use regex::Regex;
use thiserror::Error;

/// Errors raised while validating a rule
#[derive(Debug, Error)]
pub enum RuleError {
    /// Pattern failed to compile
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler error
        #[source]
        source: Box<regex::Error>,
    },

    /// Template references a group the pattern does not have
    #[error("template `{template}` references group {group}, pattern has {available}")]
    UnknownGroup {
        /// The offending template
        template: String,
        /// Referenced group index
        group: usize,
        /// Groups defined by the pattern (excluding group 0)
        available: usize,
    },
}

/// One pattern + replacement, with an optional path-derived placeholder
#[derive(Clone)]
pub struct Rule {
    regex: Regex,
    template: String,
    /// Translated template, split on the placeholder token
    segments: Vec<String>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.regex.as_str())
            .field("template", &self.template)
            .finish()
    }
}

impl Rule {
    /// Compile and validate a rule
    ///
    /// `placeholder` is the reserved token that [`Rule::expand`] replaces with a
    /// per-file value.
    pub fn new(pattern: &str, template: &str, placeholder: &str) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source: Box::new(e),
        })?;
        let available = regex.captures_len() - 1;

        let pieces: Vec<&str> = if placeholder.is_empty() {
            vec![template]
        } else {
            template.split(placeholder).collect()
        };

        let mut segments = Vec::with_capacity(pieces.len());
        for piece in pieces {
            let (translated, max_group) = translate(piece);
            if let Some(group) = max_group.filter(|g| *g > available) {
                return Err(RuleError::UnknownGroup {
                    template: template.to_string(),
                    group,
                    available,
                });
            }
            segments.push(translated);
        }

        Ok(Self {
            regex,
            template: template.to_string(),
            segments,
        })
    }

    /// The pattern source
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// The template as declared
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the template contains the placeholder token
    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.segments.len() > 1
    }

    /// Produce the replacement string for one file
    ///
    /// The placeholder is substituted literally: `$` in `value` is escaped.
    #[must_use]
    pub fn expand(&self, value: &str) -> String {
        if !self.has_placeholder() {
            return self.segments.concat();
        }
        self.segments.join(&value.replace('$', "$$"))
    }

    /// One substitution attempt: replace the leftmost match only
    #[must_use]
    pub fn replace_first(&self, content: &str, replacement: &str) -> String {
        self.regex.replace(content, replacement).into_owned()
    }
}

/// Translate `\N` references into `${N}` and escape `$`
///
/// Returns the translated text and the highest group referenced.
fn translate(template: &str) -> (String, Option<usize>) {
    let mut out = String::with_capacity(template.len() + 8);
    let mut max_group: Option<usize> = None;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    chars.next();
                    let group = d as usize - '0' as usize;
                    max_group = Some(max_group.map_or(group, |m| m.max(group)));
                    out.push_str("${");
                    out.push(d);
                    out.push('}');
                },
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                },
                _ => out.push('\\'),
            },
            '$' => out.push_str("$$"),
            _ => out.push(c),
        }
    }

    (out, max_group)
}
