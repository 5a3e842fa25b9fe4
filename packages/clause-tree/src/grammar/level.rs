//! Compiled pattern for a single hierarchy level.

use regex::Regex;

use crate::error::{ClauseTreeError, Result};

/// One level of the reference grammar.
///
/// Holds the pattern as configured plus two compiled forms: an anchored
/// regex that only matches at the start of the input, and an unanchored
/// regex used to search free text.
#[derive(Debug, Clone)]
pub struct LevelPattern {
    source: String,
    anchored: Regex,
    search: Regex,
}

impl LevelPattern {
    /// Compile a level pattern.
    ///
    /// A leading `^` is optional; the anchored form always has one and the
    /// search form never does.
    pub fn new(pattern: &str) -> Result<Self> {
        let body = pattern.strip_prefix('^').unwrap_or(pattern);
        let compile = |expr: String| {
            Regex::new(&expr).map_err(|source| ClauseTreeError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
        };

        Ok(Self {
            source: pattern.to_string(),
            anchored: compile(format!("^(?:{body})"))?,
            search: compile(body.to_string())?,
        })
    }

    /// The pattern as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Length of the match at the start of `text`, if any.
    #[must_use]
    pub fn match_prefix(&self, text: &str) -> Option<usize> {
        self.anchored.find(text).map(|m| m.end())
    }

    /// Whether `token` matches this level in its entirety.
    #[must_use]
    pub fn matches_token(&self, token: &str) -> bool {
        self.match_prefix(token) == Some(token.len())
    }

    /// Find the first occurrence anywhere in `text`.
    ///
    /// Returns the byte range of the match.
    #[must_use]
    pub fn search(&self, text: &str) -> Option<(usize, usize)> {
        self.search.find(text).map(|m| (m.start(), m.end()))
    }
}
