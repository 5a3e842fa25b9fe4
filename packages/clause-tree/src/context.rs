//! Rendering a clause together with the ancestor text that governs it.
//!
//! The own text of a clause is every record whose full reference starts
//! with the clause reference. Around it go the direct lines of each
//! ancestor: lines before the clause (conditions, outermost first) and
//! lines after it (qualifiers, innermost first).

use crate::error::Result;
use crate::grammar::ReferenceGrammar;
use crate::records::LineRecord;

/// Renders subtrees of a record sequence with their ancestor context.
#[derive(Debug, Clone, Copy)]
pub struct ContextRenderer<'a> {
    records: &'a [LineRecord],
    grammar: &'a ReferenceGrammar,
    indent_unit: usize,
}

impl<'a> ContextRenderer<'a> {
    /// Create a renderer over records with derived full references.
    #[must_use]
    pub fn new(records: &'a [LineRecord], grammar: &'a ReferenceGrammar, indent_unit: usize) -> Self {
        Self {
            records,
            grammar,
            indent_unit,
        }
    }

    /// The records being rendered.
    #[must_use]
    pub fn records(&self) -> &'a [LineRecord] {
        self.records
    }

    /// Render the clause at `start` with conditions and qualifiers.
    ///
    /// The empty reference renders the whole corpus. A reference that
    /// matches no record yields a "not found" message rather than an error.
    ///
    /// # Errors
    /// `InvalidReference` if an ancestor of a matched `start` cannot be
    /// derived.
    pub fn render(&self, start: &str) -> Result<String> {
        if !self
            .records
            .iter()
            .any(|r| r.full_reference.starts_with(start))
        {
            return Ok(not_found(start));
        }
        let ancestors = self.ancestors(start)?;

        let mut own: Vec<String> = Vec::new();
        let mut conditions: Vec<Vec<String>> = vec![Vec::new(); ancestors.len()];
        let mut qualifiers: Vec<Vec<String>> = vec![Vec::new(); ancestors.len()];

        for record in self.records {
            let reference = record.full_reference.as_str();
            if reference.starts_with(start) {
                own.push(record.render(self.indent_unit));
            } else if let Some(depth) = ancestors.iter().position(|a| a == reference) {
                let line = record.render(self.indent_unit);
                if own.is_empty() {
                    conditions[depth].push(line);
                } else {
                    qualifiers[depth].push(line);
                }
            }
        }

        // `ancestors` runs innermost first.
        let lines: Vec<String> = conditions
            .into_iter()
            .rev()
            .flatten()
            .chain(own)
            .chain(qualifiers.into_iter().flatten())
            .collect();

        Ok(lines.join("\n"))
    }

    /// Ancestor references of `start`, innermost first, root excluded.
    fn ancestors(&self, start: &str) -> Result<Vec<String>> {
        let mut ancestors = Vec::new();
        if start.is_empty() {
            return Ok(ancestors);
        }

        let mut parent = self.grammar.parent(start)?;
        while !parent.is_empty() {
            let next = self.grammar.parent(&parent)?;
            ancestors.push(parent);
            parent = next;
        }
        Ok(ancestors)
    }
}

fn not_found(start: &str) -> String {
    format!("No section could be found with the reference {start}")
}
