//! Validation, decomposition and salvage of hierarchical references.

use super::level::LevelPattern;
use crate::config::GrammarConfig;
use crate::error::{ClauseTreeError, Result};

/// The ordered level patterns plus the exclusion list.
///
/// References are validated left to right: level `n` must match the text
/// that remains after levels `0..n` consumed their tokens. Exclusion-listed
/// literals are always valid root-level references.
///
/// # Examples
/// ```
/// use clause_tree::config::GrammarConfig;
/// use clause_tree::grammar::ReferenceGrammar;
///
/// let grammar = ReferenceGrammar::new(&GrammarConfig::banking_act()).unwrap();
/// assert!(grammar.is_valid("23(1)(a)"));
/// assert_eq!(grammar.split("23(1)(a)").unwrap(), vec!["23", "(1)", "(a)"]);
/// assert_eq!(grammar.parent("23(1)(a)").unwrap(), "23(1)");
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceGrammar {
    levels: Vec<LevelPattern>,
    exclusions: Vec<String>,
}

impl ReferenceGrammar {
    /// Compile the grammar described by `config`.
    pub fn new(config: &GrammarConfig) -> Result<Self> {
        config.validate()?;
        let levels = config
            .patterns
            .iter()
            .map(|p| LevelPattern::new(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            levels,
            exclusions: config.exclusions.clone(),
        })
    }

    /// Number of levels, including the root level.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Pattern registered for `level`.
    #[must_use]
    pub fn level(&self, level: usize) -> Option<&LevelPattern> {
        self.levels.get(level)
    }

    /// Whether `reference` is an exclusion-listed literal.
    #[must_use]
    pub fn is_excluded(&self, reference: &str) -> bool {
        self.exclusions.iter().any(|e| e == reference)
    }

    /// Consume `reference` level by level.
    ///
    /// Returns the tokens matched and whatever input was left, or `None`
    /// as soon as a level fails to match non-empty remaining input.
    fn tokenize<'a>(&self, reference: &'a str) -> Option<(Vec<&'a str>, &'a str)> {
        let mut tokens = Vec::new();
        let mut rest = reference;

        for level in &self.levels {
            if rest.is_empty() {
                break;
            }
            let end = level.match_prefix(rest)?;
            if end == 0 {
                return None;
            }
            tokens.push(&rest[..end]);
            rest = &rest[end..];
        }

        Some((tokens, rest))
    }

    /// Check a reference against the grammar.
    ///
    /// True for exclusion literals, otherwise only if every token matched
    /// its level in order and no input is left over. The empty string is
    /// not a valid reference.
    #[must_use]
    pub fn is_valid(&self, reference: &str) -> bool {
        if self.is_excluded(reference) {
            return true;
        }
        matches!(
            self.tokenize(reference),
            Some((tokens, rest)) if !tokens.is_empty() && rest.is_empty()
        )
    }

    /// Decompose a reference into its per-level tokens.
    ///
    /// The empty reference (the root) decomposes to an empty list and an
    /// exclusion literal to a list holding itself.
    ///
    /// # Errors
    /// `InvalidReference` if the reference does not fully validate.
    pub fn split<'a>(&self, reference: &'a str) -> Result<Vec<&'a str>> {
        if reference.is_empty() {
            return Ok(Vec::new());
        }
        if self.is_excluded(reference) {
            return Ok(vec![reference]);
        }

        match self.tokenize(reference) {
            Some((tokens, "")) => Ok(tokens),
            _ => Err(ClauseTreeError::InvalidReference(reference.to_string())),
        }
    }

    /// Reference of the enclosing clause.
    ///
    /// A single-token reference has the empty (root) reference as parent.
    ///
    /// # Errors
    /// * `NoParent` for the empty reference
    /// * `InvalidReference` if the reference does not split
    pub fn parent(&self, reference: &str) -> Result<String> {
        if reference.is_empty() {
            return Err(ClauseTreeError::NoParent(reference.to_string()));
        }
        let tokens = self.split(reference)?;
        let keep = tokens.len().saturating_sub(1);
        Ok(tokens[..keep].concat())
    }

    /// Salvage a reference from free text.
    ///
    /// Each level is searched for (not anchored) in the text that remains
    /// after the previous match, so words between tokens are skipped. When
    /// a level cannot be found and the remaining text still contains an
    /// opening bracket, the reference is taken to end there and the partial
    /// result is returned; without a bracket the level is skipped.
    ///
    /// Returns `None` if nothing matched at all.
    ///
    /// # Examples
    /// ```
    /// use clause_tree::config::GrammarConfig;
    /// use clause_tree::grammar::ReferenceGrammar;
    ///
    /// let grammar = ReferenceGrammar::new(&GrammarConfig::banking_act()).unwrap();
    /// assert_eq!(
    ///     grammar.extract_from_noisy_text("23 subregulation (1)(a)(iv)(I)(J)"),
    ///     Some("23(1)(a)(iv)(I)".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn extract_from_noisy_text(&self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if self.is_excluded(trimmed) {
            return Some(trimmed.to_string());
        }

        let mut partial = String::new();
        let mut rest = text;

        for level in &self.levels {
            if let Some((start, end)) = level.search(rest) {
                partial.push_str(&rest[start..end]);
                rest = &rest[end..];
            } else if rest.contains('(') {
                break;
            }
        }

        (!partial.is_empty()).then_some(partial)
    }

    /// Split an indentation-stripped line into `(token, remainder)`.
    ///
    /// The prefix is tried against every level pattern in turn, regardless
    /// of hierarchy, and then against the exclusion list. The remainder
    /// starts after the token and the single separator that follows it.
    /// Without a token the whole line is returned as remainder.
    ///
    /// Whether the token belongs at this line's depth is not checked here:
    /// "(i)" reads as a letter or a numeral depending on where it sits.
    #[must_use]
    pub fn line_to_components<'a>(&self, line: &'a str) -> (&'a str, &'a str) {
        for level in &self.levels {
            if let Some(end) = level.match_prefix(line).filter(|&end| end > 0) {
                let after = &line[end..];
                let mut chars = after.chars();
                chars.next();
                return (&line[..end], chars.as_str());
            }
        }

        let trimmed = line.trim();
        if let Some(exclusion) = self.exclusions.iter().find(|e| e.as_str() == trimmed) {
            return (exclusion_slice(line, exclusion), "");
        }

        ("", line)
    }
}

/// Borrow the exclusion literal out of the line it was found in.
fn exclusion_slice<'a>(line: &'a str, exclusion: &str) -> &'a str {
    line.find(exclusion)
        .map(|start| &line[start..start + exclusion.len()])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn banking_act() -> ReferenceGrammar {
        ReferenceGrammar::new(&GrammarConfig::banking_act()).unwrap()
    }

    fn excon() -> ReferenceGrammar {
        let config = GrammarConfig::new(
            [r"^[A-Z]\.\d+", r"^\([A-Z]\)", r"^\((i|ii|iii|iv|v|vi)\)", r"^\([a-z]\)"],
            "EXCON",
        )
        .with_exclusions(["Legal context"]);
        ReferenceGrammar::new(&config).unwrap()
    }

    #[test]
    fn test_is_valid_reference() {
        let grammar = banking_act();
        assert!(!grammar.is_valid(""));
        assert!(grammar.is_valid("23(1)(a)(iv)(I)(i)(cc)(iii)(d)"));
        assert!(grammar.is_valid("23(15)(d)"));
        assert!(grammar.is_valid("23"));

        assert!(!grammar.is_valid("23(1)(c)(xviii)(A)(A)(cc)"));
        assert!(!grammar.is_valid("23(10)(d)(xviii)(C)(iv)(9)"));
        assert!(!grammar.is_valid("(1)(a)(iv)(I)(i)(cc)(iii)(d)"));
        assert!(!grammar.is_valid("23(a)(iv)(I)(i)(cc)(iii)(d)"));
    }

    #[test]
    fn test_is_valid_rejects_trailing_input() {
        let grammar = banking_act();
        assert!(!grammar.is_valid("23(1)(a)(iv)(I)(i)(cc)(iii)(d)(e)"));
        assert!(!grammar.is_valid("23(1) "));
    }

    #[test]
    fn test_exclusions_bypass_grammar() {
        let grammar = excon();
        assert!(grammar.is_valid("Legal context"));
        assert_eq!(grammar.split("Legal context").unwrap(), vec!["Legal context"]);
        assert_eq!(grammar.parent("Legal context").unwrap(), "");
        assert!(!grammar.is_valid("Legal context(A)"));
    }

    #[test]
    fn test_split_reference() {
        let grammar = banking_act();
        let components = grammar.split("23(1)(a)(iv)(I)(i)(cc)(iii)(d)").unwrap();
        assert_eq!(
            components,
            vec!["23", "(1)", "(a)", "(iv)", "(I)", "(i)", "(cc)", "(iii)", "(d)"]
        );
        assert_eq!(grammar.split("23(1)").unwrap(), vec!["23", "(1)"]);
        assert!(grammar.split("").unwrap().is_empty());
    }

    #[test]
    fn test_split_invalid_reference() {
        let grammar = banking_act();
        assert!(matches!(
            grammar.split("23(1)(c)(xviii)(A)(A)(cc)"),
            Err(ClauseTreeError::InvalidReference(_))
        ));
        assert!(grammar.split("(1)(a)(iv)(I)(i)(cc)(iii)(d)").is_err());
    }

    #[test]
    fn test_split_round_trip() {
        let grammar = banking_act();
        for reference in ["23", "23(4)", "23(11)(b)(xvi)(C)", "23(1)(a)(iv)(I)(i)(cc)(iii)(d)"] {
            assert!(grammar.is_valid(reference));
            assert_eq!(grammar.split(reference).unwrap().concat(), reference);
        }
    }

    #[test]
    fn test_parent_reference() {
        let grammar = banking_act();
        assert_eq!(grammar.parent("23(1)(c)(xviii)(A)").unwrap(), "23(1)(c)(xviii)");
        assert_eq!(grammar.parent("23(1)").unwrap(), "23");
        assert_eq!(grammar.parent("23").unwrap(), "");
        assert!(matches!(grammar.parent(""), Err(ClauseTreeError::NoParent(_))));
        assert!(grammar.parent("23(a)").is_err());
    }

    #[test]
    fn test_parent_is_valid_prefix() {
        let grammar = banking_act();
        let reference = "23(2)(b)(vii)(C)(ii)";
        let parent = grammar.parent(reference).unwrap();
        assert!(reference.starts_with(&parent));
        assert!(grammar.is_valid(&parent));
    }

    #[test]
    fn test_scenario_three_level_grammar() {
        let config = GrammarConfig::new([r"^23", r"^\(\d+\)", r"^\([a-z]\)"], "R");
        let grammar = ReferenceGrammar::new(&config).unwrap();
        assert!(grammar.is_valid("23(1)(a)"));
        assert_eq!(grammar.split("23(1)(a)").unwrap(), vec!["23", "(1)", "(a)"]);
        assert_eq!(grammar.parent("23(1)(a)").unwrap(), "23(1)");
    }

    #[test]
    fn test_extract_valid_reference() {
        let grammar = banking_act();
        assert_eq!(
            grammar.extract_from_noisy_text("23 subregulation (1)(a)(iv)(I)(i)(cc)(iii)(d)"),
            Some("23(1)(a)(iv)(I)(i)(cc)(iii)(d)".to_string())
        );
        assert_eq!(
            grammar.extract_from_noisy_text("   23 subregulation (1)(a)(iv)    "),
            Some("23(1)(a)(iv)".to_string())
        );
        assert_eq!(
            grammar.extract_from_noisy_text("23 subregulation (1)(a)(iv)(I)(J)"),
            Some("23(1)(a)(iv)(I)".to_string())
        );
        assert_eq!(grammar.extract_from_noisy_text("23(10)"), Some("23(10)".to_string()));
        assert_eq!(
            grammar.extract_from_noisy_text("23 subregulation (1)(a)(iv) hello (I) "),
            Some("23(1)(a)(iv)(I)".to_string())
        );
    }

    #[test]
    fn test_extract_nothing_found() {
        let grammar = banking_act();
        assert_eq!(grammar.extract_from_noisy_text("no reference here"), None);
        assert_eq!(grammar.extract_from_noisy_text(""), None);
    }

    #[test]
    fn test_extract_excon_reference() {
        let grammar = excon();
        assert_eq!(
            grammar.extract_from_noisy_text("B.18 Gold (B)(i)(b)"),
            Some("B.18(B)(i)(b)".to_string())
        );
        assert_eq!(
            grammar.extract_from_noisy_text("  Legal context "),
            Some("Legal context".to_string())
        );
        // Truncated at the first level that does not fit, because text with a
        // bracket remains.
        assert_eq!(
            grammar.extract_from_noisy_text("B.18 Gold (B)(a)(b)"),
            Some("B.18(B)".to_string())
        );
    }

    #[test]
    fn test_line_to_components() {
        let grammar = banking_act();
        let text = "Africa means any country forming part of the African Union.";
        assert_eq!(grammar.line_to_components(text), ("", text));

        assert_eq!(grammar.line_to_components("(1) Definitions"), ("(1)", "Definitions"));
        assert_eq!(
            grammar.line_to_components("(a) a list of application numbers;"),
            ("(a)", "a list of application numbers;")
        );
        assert_eq!(
            grammar.line_to_components("(xviii) Authorised Dealers must reset"),
            ("(xviii)", "Authorised Dealers must reset")
        );
        assert_eq!(
            grammar.line_to_components("(A) Authorised Dealers"),
            ("(A)", "Authorised Dealers")
        );
        assert_eq!(
            grammar.line_to_components("(dd) CMA residents who travel overland"),
            ("(dd)", "CMA residents who travel overland")
        );
    }

    #[test]
    fn test_line_to_components_ambiguous_token() {
        // "(i)" is matched as the first pattern that fits; depth decides later.
        let grammar = banking_act();
        assert_eq!(grammar.line_to_components("(i) first"), ("(i)", "first"));
        assert_eq!(grammar.line_to_components("(ii)"), ("(ii)", ""));
    }

    #[test]
    fn test_line_to_components_exclusion() {
        let grammar = excon();
        assert_eq!(grammar.line_to_components("Legal context"), ("Legal context", ""));
        assert_eq!(
            grammar.line_to_components("Legal context matters"),
            ("", "Legal context matters")
        );
    }
}
