//! Line-to-record transformation and full-reference derivation.

use super::types::LineRecord;
use crate::config::{CITATION_PATTERN, HEADING_MARKER};
use crate::error::{ClauseTreeError, Result};
use crate::grammar::ReferenceGrammar;
use crate::parser::LineParser;

/// Side-channel markers found on a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMarkers {
    /// Document named in the trailing citation.
    pub document: String,

    /// Page named in the trailing citation.
    pub page: String,

    /// Whether the heading marker was present.
    pub is_heading: bool,
}

/// Remove the trailing citation and the heading marker from a line.
///
/// Leading whitespace is left untouched so the indentation can still be
/// measured afterwards.
#[must_use]
pub fn strip_markers(line: &str) -> (LineMarkers, String) {
    let mut markers = LineMarkers::default();
    let mut line = line.to_string();

    if let Some(caps) = CITATION_PATTERN.captures(&line) {
        if let (Some(whole), Some(document), Some(page)) = (caps.get(0), caps.get(1), caps.get(2)) {
            markers.document = document.as_str().trim().to_string();
            markers.page = page.as_str().trim().to_string();
            let (start, end) = (whole.start(), whole.end());
            line.replace_range(start..end, "");
        }
    }

    if let Some(start) = line.find(HEADING_MARKER) {
        markers.is_heading = true;
        line.replace_range(start..start + HEADING_MARKER.len(), "");
    }

    (markers, line)
}

/// Convert corpus lines into records, in order.
///
/// Blank lines are skipped. Full references are left empty; see
/// [`derive_full_references`].
///
/// # Errors
/// Any formatting error raised by the line parser.
pub fn transform_lines<'a, I>(lines: I, parser: &LineParser) -> Result<Vec<LineRecord>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut records = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let (markers, remaining) = strip_markers(line);
        let parsed = parser.parse(&remaining)?;

        records.push(LineRecord {
            indent: parsed.indent,
            token: parsed.token.trim().to_string(),
            text: parsed.body,
            document: markers.document,
            page: markers.page,
            is_heading: markers.is_heading,
            full_reference: String::new(),
        });
    }

    tracing::debug!(records = records.len(), "Transformed lines into records");
    Ok(records)
}

/// Fill in the full reference of every record.
///
/// Single forward scan keeping, per indentation level, the last non-empty
/// token and the last full reference seen:
///
/// - indentation 0: `prefix` + own token, or the last indentation-0 token
///   when the line has none (empty if there was none yet). Exclusion
///   literals stand on their own, without prefix.
/// - indentation k > 0: full reference of the last record at k - 1, plus
///   own token or the last token seen at k.
///
/// # Errors
/// `InvalidDerivedReference` if a derived reference fails the grammar.
pub fn derive_full_references(
    records: &mut [LineRecord],
    grammar: &ReferenceGrammar,
    prefix: &str,
) -> Result<()> {
    let mut last_token: Vec<Option<String>> = Vec::new();
    let mut last_full: Vec<String> = Vec::new();

    for (index, record) in records.iter_mut().enumerate() {
        let indent = record.indent;
        if last_token.len() <= indent {
            last_token.resize(indent + 1, None);
            last_full.resize(indent + 1, String::new());
        }
        if !record.token.is_empty() {
            last_token[indent] = Some(record.token.clone());
        }

        let full_reference = if indent == 0 {
            match &last_token[0] {
                Some(token) if grammar.is_excluded(token) => token.clone(),
                Some(token) => format!("{prefix}{token}"),
                None => String::new(),
            }
        } else {
            let stub = last_token[indent].as_deref().unwrap_or_default();
            format!("{}{stub}", last_full[indent - 1])
        };

        if !full_reference.is_empty() && !grammar.is_valid(&full_reference) {
            return Err(ClauseTreeError::InvalidDerivedReference {
                index,
                reference: full_reference,
                text: record.text.clone(),
            });
        }
        if indent > 0 && full_reference.is_empty() {
            return Err(ClauseTreeError::InvalidDerivedReference {
                index,
                reference: full_reference,
                text: record.text.clone(),
            });
        }

        last_full[indent] = full_reference.clone();
        record.full_reference = full_reference;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GrammarConfig;
    use pretty_assertions::assert_eq;

    fn parser() -> LineParser {
        LineParser::from_config(&GrammarConfig::banking_act()).unwrap()
    }

    fn records_from(rows: &[(usize, &str)]) -> Vec<LineRecord> {
        rows.iter()
            .enumerate()
            .map(|(i, (indent, token))| LineRecord::new(*indent, *token, (i + 1).to_string()))
            .collect()
    }

    #[test]
    fn test_strip_markers() {
        let (markers, rest) = strip_markers(
            "    (a) Introduction (#Heading) (reference_pdf_document_1.pdf; pg 2)",
        );
        assert_eq!(markers.document, "reference_pdf_document_1.pdf");
        assert_eq!(markers.page, "2");
        assert!(markers.is_heading);
        assert_eq!(rest.trim_end(), "    (a) Introduction");
    }

    #[test]
    fn test_strip_markers_without_markers() {
        let (markers, rest) = strip_markers("        (ii) plain text ");
        assert_eq!(markers, LineMarkers::default());
        assert_eq!(rest, "        (ii) plain text ");
    }

    #[test]
    fn test_transform_lines() {
        let lines = [
            "(1) Duties and responsibilities of Authorised Dealers (#Heading) (reference_pdf_document_1.pdf; pg 1)",
            "some preamble with no reference, but correct spacing here",
            "    (a) Introduction (#Heading) (reference_pdf_document_1.pdf; pg 2)",
            "        (i) Authorised Dealers should note the Regulations. (reference_pdf_document_2.pdf; pg 1)",
            "        (ii) In carrying out the important duties entrusted to them. ",
            "    (b) Procedures to be followed by Authorised Dealers (#Heading)",
            "        (i) In cases where an Authorised Dealer is uncertain. ",
            "        (ii) Should an Authorised Dealer have any doubt. ",
            "",
            "  ",
            "    (e) Transactions with Common Monetary Area residents (#Heading)",
            "        (viii) As an exception to (vi) above, Authorised Dealers may:",
            "            (A) sell foreign currency to: ",
            "                (i) foreign diplomats; ",
            "                (ii) CMA residents in South Africa;  ",
        ];

        let records = transform_lines(lines, &parser()).unwrap();
        assert_eq!(records.len(), lines.len() - 2);
        assert_eq!(records.iter().filter(|r| !r.document.is_empty()).count(), 3);
        assert_eq!(records[0].document, "reference_pdf_document_1.pdf");
        assert_eq!(records[0].page, "1");
        assert_eq!(records[0].text, "Duties and responsibilities of Authorised Dealers");
        assert_eq!(records[3].document, "reference_pdf_document_2.pdf");
        assert_eq!(records[3].page, "1");
        assert_eq!(records.iter().filter(|r| r.is_heading).count(), 4);
        assert_eq!(
            records.iter().filter(|r| !r.token.is_empty()).count(),
            records.len() - 1
        );
        assert_eq!(records[12].text, "CMA residents in South Africa;");
    }

    #[test]
    fn test_transform_lines_propagates_formatting_error() {
        let lines = ["(1) Fine", "  (a) two spaces"];
        let err = transform_lines(lines, &parser()).unwrap_err();
        assert!(err.is_formatting());
    }

    #[test]
    fn test_derive_full_references() {
        let grammar = ReferenceGrammar::new(&GrammarConfig::banking_act()).unwrap();
        let mut records = records_from(&[
            (0, "(1)"),
            (0, ""),
            (1, "(b)"),
            (2, "(vii)"),
            (3, "(C)"),
            (2, "(xvi)"),
            (2, ""),
        ]);
        derive_full_references(&mut records, &grammar, "23").unwrap();

        let full: Vec<&str> = records.iter().map(|r| r.full_reference.as_str()).collect();
        assert_eq!(
            full,
            vec![
                "23(1)",
                "23(1)",
                "23(1)(b)",
                "23(1)(b)(vii)",
                "23(1)(b)(vii)(C)",
                "23(1)(b)(xvi)",
                "23(1)(b)(xvi)",
            ]
        );
    }

    #[test]
    fn test_derive_rejects_level_mismatch() {
        let grammar = ReferenceGrammar::new(&GrammarConfig::banking_act()).unwrap();
        let mut records = records_from(&[
            (0, "(1)"),
            (0, ""),
            (1, "(B)"),
            (2, "(vii)"),
            (3, "(C)"),
            (2, "(D)"),
            (2, ""),
        ]);
        let err = derive_full_references(&mut records, &grammar, "23").unwrap_err();
        assert!(matches!(
            err,
            ClauseTreeError::InvalidDerivedReference { index: 2, .. }
        ));
    }

    #[test]
    fn test_derive_scenario_prefix() {
        let config = GrammarConfig::new([r"^23", r"^\(\d+\)", r"^\([a-z]\)"], "R");
        let parser = LineParser::from_config(&config).unwrap();
        let mut records = transform_lines(["(1) Intro", "    (a) Sub"], &parser).unwrap();
        derive_full_references(&mut records, parser.grammar(), "23").unwrap();
        assert_eq!(records[0].full_reference, "23(1)");
        assert_eq!(records[1].full_reference, "23(1)(a)");
    }

    #[test]
    fn test_derive_inherits_from_same_indentation_only() {
        let grammar = ReferenceGrammar::new(&GrammarConfig::banking_act()).unwrap();
        let mut records = records_from(&[
            (0, "(1)"),
            (1, "(a)"),
            (2, "(i)"),
            (1, ""),
            (0, "(2)"),
            (0, ""),
        ]);
        derive_full_references(&mut records, &grammar, "23").unwrap();
        assert_eq!(records[3].full_reference, "23(1)(a)");
        assert_eq!(records[5].full_reference, "23(2)");
    }

    #[test]
    fn test_derive_leading_unreferenced_line() {
        let grammar = ReferenceGrammar::new(&GrammarConfig::banking_act()).unwrap();
        let mut records = records_from(&[(0, ""), (0, "(1)")]);
        derive_full_references(&mut records, &grammar, "23").unwrap();
        assert_eq!(records[0].full_reference, "");
        assert_eq!(records[1].full_reference, "23(1)");
    }

    #[test]
    fn test_derive_exclusion_without_prefix() {
        let config = GrammarConfig::banking_act().with_exclusions(["Legal context"]);
        let grammar = ReferenceGrammar::new(&config).unwrap();
        let mut records = records_from(&[(0, "Legal context"), (0, ""), (0, "(1)")]);
        derive_full_references(&mut records, &grammar, "23").unwrap();
        assert_eq!(records[0].full_reference, "Legal context");
        assert_eq!(records[1].full_reference, "Legal context");
        assert_eq!(records[2].full_reference, "23(1)");
    }

    #[test]
    fn test_derive_rejects_orphan_indentation() {
        let grammar = ReferenceGrammar::new(&GrammarConfig::banking_act()).unwrap();
        let mut records = records_from(&[(1, "(a)")]);
        assert!(derive_full_references(&mut records, &grammar, "23").is_err());
    }
}
