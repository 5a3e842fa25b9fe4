//! Extraction of non-text blocks (tables, formulas, examples).
//!
//! A block opens with a marker line such as `#Table 1` and closes with
//! `#Table 1 - end`. Its content is kept verbatim, keyed by the opening
//! marker, and removed from the line sequence handed to the parser.

use serde::Serialize;

use crate::config::{BLOCK_MARKER_PREFIX, BLOCK_TERMINATOR};
use crate::error::{ClauseTreeError, Result};

/// A block of lines lifted out of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonTextBlock {
    /// Block label (e.g. "Table").
    pub label: String,

    /// Trimmed opening marker line (e.g. "#Table 1").
    pub key: String,

    /// Content lines, indentation preserved.
    pub lines: Vec<String>,
}

/// Split `lines` into the remaining text lines and the `label` blocks.
///
/// # Errors
/// * `BlockTooLong` if a block has more than `line_limit` lines
/// * `UnterminatedBlock` if input ends inside a block
pub fn extract_blocks<S: AsRef<str>>(
    lines: &[S],
    label: &str,
    line_limit: usize,
) -> Result<(Vec<String>, Vec<NonTextBlock>)> {
    let identifier = format!("{BLOCK_MARKER_PREFIX}{label}");
    let terminator = format!("{identifier} {BLOCK_TERMINATOR}");

    let mut remaining = Vec::new();
    let mut blocks: Vec<NonTextBlock> = Vec::new();
    let mut current: Option<NonTextBlock> = None;

    for line in lines {
        let line = line.as_ref();
        let stripped = line.trim_start_matches(' ');

        if stripped.starts_with(&identifier) {
            if line.contains(BLOCK_TERMINATOR) {
                blocks.extend(current.take());
            } else {
                if let Some(open) = current.take() {
                    tracing::warn!(block = %open.key, "Block opened before the previous one was closed");
                    blocks.push(open);
                }
                current = Some(NonTextBlock {
                    label: label.to_string(),
                    key: stripped.trim().to_string(),
                    lines: Vec::new(),
                });
            }
            continue;
        }

        match current.as_mut() {
            Some(block) if block.lines.len() < line_limit => block.lines.push(line.to_string()),
            Some(block) => {
                return Err(ClauseTreeError::BlockTooLong {
                    block: block.key.clone(),
                    limit: line_limit,
                    terminator,
                });
            }
            None => remaining.push(line.to_string()),
        }
    }

    if let Some(block) = current {
        return Err(ClauseTreeError::UnterminatedBlock {
            block: block.key,
            terminator,
        });
    }

    tracing::debug!(label = %label, blocks = blocks.len(), "Extracted non-text blocks");
    Ok((remaining, blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn authorised_dealers() -> Vec<String> {
        [
            "A.2 Authorised entities (#Heading)",
            "    (A) Authorised Dealers (#Heading)",
            "    The offices in South Africa of the banks in Table 1 are authorised to act as Authorised Dealers: ",
            "        #Table 1",
            "            Name of entity - Authorised Dealer",
            "            ABSA Bank Limited",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    #[test]
    fn test_extract_blocks() {
        let mut lines = authorised_dealers();
        lines.push("        #Table 1 - end".to_string());

        let (remaining, blocks) = extract_blocks(&lines, "Table", 100).unwrap();
        assert_eq!(remaining.len(), 3);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].key, "#Table 1");
        assert_eq!(blocks[0].label, "Table");
        assert_eq!(
            blocks[0].lines,
            vec![
                "            Name of entity - Authorised Dealer",
                "            ABSA Bank Limited",
            ]
        );
    }

    #[test]
    fn test_other_labels_are_left_alone() {
        let mut lines = authorised_dealers();
        lines.push("        #Table 1 - end".to_string());

        let (remaining, blocks) = extract_blocks(&lines, "Formula", 100).unwrap();
        assert_eq!(remaining, lines);
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_block_too_long() {
        let mut lines = authorised_dealers();
        for i in 0..110 {
            lines.push(format!("            Entity {i}"));
        }
        lines.push("    More text without the ending the table".to_string());

        let err = extract_blocks(&lines, "Table", 100).unwrap_err();
        assert!(matches!(err, ClauseTreeError::BlockTooLong { limit: 100, .. }));
    }

    #[test]
    fn test_unterminated_block() {
        let err = extract_blocks(&authorised_dealers(), "Table", 100).unwrap_err();
        assert!(matches!(err, ClauseTreeError::UnterminatedBlock { .. }));
        assert!(err.to_string().contains("#Table - end"));
    }
}
