//! Line parser: indentation, local reference token and body text.

use crate::config::GrammarConfig;
use crate::error::{ClauseTreeError, Result};
use crate::grammar::ReferenceGrammar;

/// One line split into its structural parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Depth derived from leading spaces.
    pub indent: usize,

    /// Local reference token (e.g. "(iv)"), empty if the line has none.
    pub token: String,

    /// Remaining text, trimmed.
    pub body: String,
}

/// Parses single lines of numbered text.
///
/// Level 0 of the grammar is the document identifier and never appears on
/// a line, so a line at indentation `n` carries a token of level `n + 1`.
#[derive(Debug, Clone)]
pub struct LineParser {
    grammar: ReferenceGrammar,
    indent_unit: usize,
}

impl LineParser {
    /// Create a parser for the given grammar.
    ///
    /// # Errors
    /// `InvalidConfig` if `indent_unit` is zero.
    pub fn new(grammar: ReferenceGrammar, indent_unit: usize) -> Result<Self> {
        if indent_unit == 0 {
            return Err(ClauseTreeError::InvalidConfig(
                "indent_unit must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            grammar,
            indent_unit,
        })
    }

    /// Compile the grammar in `config` and build a parser around it.
    pub fn from_config(config: &GrammarConfig) -> Result<Self> {
        Self::new(ReferenceGrammar::new(config)?, config.indent_unit)
    }

    /// The grammar this parser checks tokens against.
    #[must_use]
    pub fn grammar(&self) -> &ReferenceGrammar {
        &self.grammar
    }

    /// Spaces per indentation level.
    #[must_use]
    pub fn indent_unit(&self) -> usize {
        self.indent_unit
    }

    /// Parse a line into indentation level, token and body.
    ///
    /// # Errors
    /// * `Indentation` if the leading spaces are not a multiple of the unit
    /// * `IndentedExclusion` if an exclusion literal is indented
    /// * `TooDeep` if the line is deeper than the grammar
    /// * `LevelMismatch` if the token does not fit the line's level
    pub fn parse(&self, line: &str) -> Result<ParsedLine> {
        let stripped = line.trim_start_matches(' ');
        let spaces = line.len() - stripped.len();
        if spaces % self.indent_unit != 0 {
            return Err(ClauseTreeError::Indentation {
                indent: spaces,
                unit: self.indent_unit,
                line: line.to_string(),
            });
        }
        let indent = spaces / self.indent_unit;

        let (token, rest) = self.grammar.line_to_components(stripped);

        if !token.is_empty() {
            if self.grammar.is_excluded(token) {
                if indent != 0 {
                    return Err(ClauseTreeError::IndentedExclusion {
                        token: token.to_string(),
                        line: line.to_string(),
                    });
                }
            } else {
                let level = indent + 1;
                let Some(expected) = self.grammar.level(level) else {
                    return Err(ClauseTreeError::TooDeep {
                        level: indent,
                        max: self.grammar.depth().saturating_sub(2),
                        line: line.to_string(),
                    });
                };
                if !expected.matches_token(token) {
                    return Err(ClauseTreeError::LevelMismatch {
                        level: indent,
                        token: token.to_string(),
                        pattern: expected.as_str().to_string(),
                        line: line.to_string(),
                    });
                }
            }
        }

        Ok(ParsedLine {
            indent,
            token: token.to_string(),
            body: rest.trim().to_string(),
        })
    }
}
