//! Configuration constants and the grammar configuration value.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ClauseTreeError, Result};

/// Default number of spaces per indentation level.
pub const DEFAULT_INDENT_UNIT: usize = 4;

/// Default maximum number of lines in a non-text block.
pub const DEFAULT_BLOCK_LINE_LIMIT: usize = 100;

/// Inline marker flagging a line as a heading.
pub const HEADING_MARKER: &str = "(#Heading)";

/// Prefix of a non-text block marker line (e.g. `#Table 1`).
pub const BLOCK_MARKER_PREFIX: &str = "#";

/// Text that closes a non-text block (e.g. `#Table 1 - end`).
pub const BLOCK_TERMINATOR: &str = "- end";

/// Trailing source citation: `(<document>.pdf; pg <page>)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static CITATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*\.pdf); pg (\d+)\)\s*$").expect("valid regex"));

/// Lowercase Roman numerals i to xviii in round brackets.
const ROMAN_LEVEL: &str =
    r"^\((i|ii|iii|iv|v|vi|vii|viii|ix|x|xi|xii|xiii|xiv|xv|xvi|xvii|xviii)\)";

fn default_indent_unit() -> usize {
    DEFAULT_INDENT_UNIT
}

fn default_block_line_limit() -> usize {
    DEFAULT_BLOCK_LINE_LIMIT
}

fn default_non_text_labels() -> Vec<String> {
    ["Table", "Formula", "Example", "Definition"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Immutable description of a document's numbering scheme.
///
/// Passed by reference into every component constructor; nothing in the
/// crate keeps process-wide grammar state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Ordered level patterns. Level 0 is the document identifier.
    pub patterns: Vec<String>,

    /// Root-level literals that bypass the patterns.
    #[serde(default)]
    pub exclusions: Vec<String>,

    /// Identifier of the tree root.
    pub root_id: String,

    /// Spaces per indentation level.
    #[serde(default = "default_indent_unit")]
    pub indent_unit: usize,

    /// Prefix prepended to indentation-0 references (e.g. "23").
    #[serde(default)]
    pub reference_prefix: String,

    /// Labels of non-text blocks removed before parsing.
    #[serde(default = "default_non_text_labels")]
    pub non_text_labels: Vec<String>,

    /// Hard stop on the length of a non-text block.
    #[serde(default = "default_block_line_limit")]
    pub block_line_limit: usize,
}

impl GrammarConfig {
    /// Create a configuration with default indentation and block settings.
    #[must_use]
    pub fn new(
        patterns: impl IntoIterator<Item = impl Into<String>>,
        root_id: impl Into<String>,
    ) -> Self {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            exclusions: Vec::new(),
            root_id: root_id.into(),
            indent_unit: DEFAULT_INDENT_UNIT,
            reference_prefix: String::new(),
            non_text_labels: default_non_text_labels(),
            block_line_limit: DEFAULT_BLOCK_LINE_LIMIT,
        }
    }

    /// Set the exclusion list.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclusions = exclusions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the indentation-0 reference prefix.
    #[must_use]
    pub fn with_reference_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reference_prefix = prefix.into();
        self
    }

    /// Set the indentation unit.
    #[must_use]
    pub fn with_indent_unit(mut self, unit: usize) -> Self {
        self.indent_unit = unit;
        self
    }

    /// Grammar of regulation 23 of the Banks Act.
    ///
    /// ```text
    /// 23 (1) (a) (iv) (I) (i) (cc) (iii) (d)
    /// ```
    #[must_use]
    pub fn banking_act() -> Self {
        Self::new(
            [
                r"^23",
                r"^\(\d+\)",
                r"^\([a-z]\)",
                ROMAN_LEVEL,
                r"^\([A-Z]\)",
                ROMAN_LEVEL,
                r"^\([a-z]{2}\)",
                ROMAN_LEVEL,
                r"^\([a-z]\)",
            ],
            "BA",
        )
        .with_reference_prefix("23")
    }

    /// Parse a configuration from YAML text and validate it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file and validate it.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded grammar configuration");
        Self::from_yaml_str(&yaml)
    }

    /// Check that the configuration can drive a grammar.
    ///
    /// # Errors
    /// * `InvalidConfig` for an empty pattern list or a zero indentation unit
    /// * `InvalidPattern` for a pattern that does not compile
    pub fn validate(&self) -> Result<()> {
        if self.patterns.is_empty() {
            return Err(ClauseTreeError::InvalidConfig(
                "at least one level pattern is required".to_string(),
            ));
        }
        if self.indent_unit == 0 {
            return Err(ClauseTreeError::InvalidConfig(
                "indent_unit must be greater than zero".to_string(),
            ));
        }
        for pattern in &self.patterns {
            Regex::new(pattern).map_err(|source| ClauseTreeError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self::banking_act()
    }
}
