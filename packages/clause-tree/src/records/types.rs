//! Record type produced for every line of the corpus.

use serde::Serialize;

/// One line of source text after markers and indentation are stripped.
///
/// Record order is the order of the corpus and is significant: it is how
/// ancestor and descendant lines are related to each other later on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    /// Indentation level.
    pub indent: usize,

    /// Local reference token, empty if the line has none.
    pub token: String,

    /// Body text with token, markers and surrounding whitespace removed.
    pub text: String,

    /// Source document from the trailing citation, if any.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub document: String,

    /// Source page from the trailing citation, if any.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub page: String,

    /// Whether the line carried the heading marker.
    pub is_heading: bool,

    /// Root-to-node reference, filled in by derivation.
    pub full_reference: String,
}

impl LineRecord {
    /// Create a record without citation, heading or full reference.
    #[must_use]
    pub fn new(indent: usize, token: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            indent,
            token: token.into(),
            text: text.into(),
            document: String::new(),
            page: String::new(),
            is_heading: false,
            full_reference: String::new(),
        }
    }

    /// Number of whitespace-delimited words in the body.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Heading text this record contributes to its tree node.
    #[must_use]
    pub fn heading_text(&self) -> &str {
        if self.is_heading {
            &self.text
        } else {
            ""
        }
    }

    /// Render the record as it appears in the document.
    ///
    /// Indentation is restored as `indent * indent_unit` spaces.
    #[must_use]
    pub fn render(&self, indent_unit: usize) -> String {
        let mut line = " ".repeat(self.indent * indent_unit);
        match (self.token.is_empty(), self.text.is_empty()) {
            (true, _) => line.push_str(&self.text),
            (false, true) => line.push_str(&self.token),
            (false, false) => {
                line.push_str(&self.token);
                line.push(' ');
                line.push_str(&self.text);
            }
        }
        line
    }
}
