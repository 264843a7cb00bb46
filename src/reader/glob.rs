//! Glob-to-regex compilation for source path patterns

use crate::error::{Error, Result};
use regex::Regex;

/// A compiled glob pattern.
///
/// Supports `*` (any run of non-separator characters), `**` (any run of
/// characters including separators) and `?` (one non-separator character).
/// Patterns match the full object path relative to the source root.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    regex: Regex,
    /// Literal directory prefix before the first wildcard, used to narrow
    /// store listings
    prefix: String,
}

impl GlobPattern {
    /// Compile a glob pattern
    pub fn compile(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim_matches('/');
        if pattern.is_empty() {
            return Err(Error::GlobPattern {
                pattern: pattern.to_string(),
                message: "empty pattern".to_string(),
            });
        }

        let mut regex = String::from("^");
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '*' => {
                    if chars.peek() == Some(&'*') {
                        chars.next();
                        if chars.peek() == Some(&'/') {
                            // `**/` spans zero or more directories
                            chars.next();
                            regex.push_str("(?:.*/)?");
                        } else {
                            regex.push_str(".*");
                        }
                    } else {
                        regex.push_str("[^/]*");
                    }
                }
                '?' => regex.push_str("[^/]"),
                c => regex.push_str(&regex::escape(&c.to_string())),
            }
        }
        regex.push('$');

        let regex = Regex::new(&regex).map_err(|e| Error::GlobPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            regex,
            prefix: literal_prefix(pattern),
        })
    }

    /// Whether a path (relative to the source root) matches
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path.trim_matches('/'))
    }

    /// Literal directory prefix usable to narrow listings
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// The directory part of the pattern before the first wildcard
fn literal_prefix(pattern: &str) -> String {
    let wildcard = pattern
        .find(|c| c == '*' || c == '?')
        .unwrap_or(pattern.len());
    match pattern[..wildcard].rfind('/') {
        Some(idx) => pattern[..idx].to_string(),
        None => String::new(),
    }
}
