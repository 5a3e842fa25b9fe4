//! Clause Tree - reconstruct the hierarchy of numbered regulatory text.
//!
//! Regulatory documents number their clauses per level ("23", "(1)",
//! "(a)", "(iv)", ...) and express nesting through indentation. This crate
//! turns such text into records with full references, builds a tree of
//! references, renders any clause together with the ancestor text that
//! governs it, and splits the tree into chunks that fit a token budget.
//!
//! # Example
//!
//! ```
//! use clause_tree::config::GrammarConfig;
//! use clause_tree::corpus::process_lines;
//!
//! let lines = ["(1) Intro (#Heading)", "    (a) Sub", "    (b) Another"];
//! let corpus = process_lines(lines, &GrammarConfig::banking_act()).unwrap();
//! assert_eq!(corpus.records[1].full_reference, "23(1)(a)");
//!
//! let text = corpus.renderer().render("23(1)(b)").unwrap();
//! assert_eq!(text, "(1) Intro\n    (b) Another");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Grammar configuration, presets and constants
//! - [`error`]: Error types and Result alias
//! - [`grammar`]: Validation, decomposition and salvage of references
//! - [`parser`]: Line parser (indentation, token, body)
//! - [`records`]: Line records, full-reference derivation, non-text blocks
//! - [`tree`]: Arena-backed reference tree and its renderings
//! - [`context`]: Clause rendering with conditions and qualifiers
//! - [`splitting`]: Token-bounded splitting into chunks
//! - [`corpus`]: Pipeline from files to records
//! - [`yaml`]: YAML output
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod context;
pub mod corpus;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod records;
pub mod splitting;
pub mod tree;
pub mod yaml;

pub use config::GrammarConfig;
pub use context::ContextRenderer;
pub use corpus::{load_corpus, process_lines, Corpus};
pub use error::{ClauseTreeError, Result};
pub use grammar::ReferenceGrammar;
pub use parser::{LineParser, ParsedLine};
pub use records::LineRecord;
pub use splitting::{Chunk, SplitEngine, TokenCounter};
pub use tree::{build_tree, ReferenceTree};
