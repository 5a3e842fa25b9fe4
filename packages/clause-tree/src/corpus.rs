//! Corpus pipeline tying file reading, block extraction and records together.

use std::path::Path;

use serde::Serialize;

use crate::config::GrammarConfig;
use crate::context::ContextRenderer;
use crate::error::Result;
use crate::grammar::ReferenceGrammar;
use crate::parser::LineParser;
use crate::records::{derive_full_references, extract_blocks, transform_lines, LineRecord, NonTextBlock};
use crate::tree::{build_tree, ReferenceTree};

/// Records and side-channel blocks of one or more source files.
#[derive(Debug, Clone, Serialize)]
pub struct Corpus {
    /// Records in corpus order, full references derived.
    pub records: Vec<LineRecord>,

    /// Non-text blocks lifted out before parsing.
    pub blocks: Vec<NonTextBlock>,

    #[serde(skip)]
    grammar: ReferenceGrammar,

    #[serde(skip)]
    root_id: String,

    #[serde(skip)]
    indent_unit: usize,
}

impl Corpus {
    /// Grammar the records were parsed with.
    #[must_use]
    pub fn grammar(&self) -> &ReferenceGrammar {
        &self.grammar
    }

    /// Build the reference tree for these records.
    ///
    /// # Errors
    /// `InvalidRecordReference` for the first record the grammar rejects.
    pub fn build_tree(&self) -> Result<ReferenceTree> {
        build_tree(&self.root_id, &self.records, &self.grammar)
    }

    /// Context renderer over these records.
    #[must_use]
    pub fn renderer(&self) -> ContextRenderer<'_> {
        ContextRenderer::new(&self.records, &self.grammar, self.indent_unit)
    }
}

/// Load and process a set of corpus files, in order.
///
/// Files are read as UTF-8. Blocks are extracted per file, then the
/// remaining lines of all files are processed as one sequence.
///
/// # Errors
/// IO errors, block errors, formatting errors and derivation errors.
pub fn load_corpus<P: AsRef<Path>>(paths: &[P], config: &GrammarConfig) -> Result<Corpus> {
    let mut lines: Vec<String> = Vec::new();
    let mut blocks = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let (remaining, file_blocks) = strip_blocks(content.lines(), config)?;
        tracing::info!(
            path = %path.display(),
            lines = remaining.len(),
            blocks = file_blocks.len(),
            "Read corpus file"
        );
        lines.extend(remaining);
        blocks.extend(file_blocks);
    }

    build_corpus(&lines, blocks, config)
}

/// Process in-memory corpus lines the same way as [`load_corpus`].
///
/// # Errors
/// Block errors, formatting errors and derivation errors.
pub fn process_lines<'a, I>(lines: I, config: &GrammarConfig) -> Result<Corpus>
where
    I: IntoIterator<Item = &'a str>,
{
    let (remaining, blocks) = strip_blocks(lines, config)?;
    build_corpus(&remaining, blocks, config)
}

/// Drop blank lines and lift out every configured block label.
fn strip_blocks<'a, I>(lines: I, config: &GrammarConfig) -> Result<(Vec<String>, Vec<NonTextBlock>)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut remaining: Vec<String> = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect();
    let mut blocks = Vec::new();

    for label in &config.non_text_labels {
        let (rest, found) = extract_blocks(&remaining, label, config.block_line_limit)?;
        remaining = rest;
        blocks.extend(found);
    }

    Ok((remaining, blocks))
}

fn build_corpus(lines: &[String], blocks: Vec<NonTextBlock>, config: &GrammarConfig) -> Result<Corpus> {
    config.validate()?;
    let parser = LineParser::from_config(config)?;

    let mut records = transform_lines(lines.iter().map(String::as_str), &parser)?;
    derive_full_references(&mut records, parser.grammar(), &config.reference_prefix)?;

    tracing::info!(
        records = records.len(),
        blocks = blocks.len(),
        "Processed corpus"
    );

    Ok(Corpus {
        records,
        blocks,
        grammar: parser.grammar().clone(),
        root_id: config.root_id.clone(),
        indent_unit: config.indent_unit,
    })
}
