//! Error types for clause-tree.
//!
//! A single `ClauseTreeError` covers every failure the pipeline can
//! surface. Structural corpus errors are never recovered locally; they are
//! returned to the immediate caller with the offending line or reference.

use thiserror::Error;

/// Main error type for the clause-tree library.
#[derive(Debug, Error)]
pub enum ClauseTreeError {
    /// Leading whitespace is not a whole number of indentation units.
    #[error("Indentation of {indent} spaces is not a multiple of {unit}: '{line}'")]
    Indentation {
        indent: usize,
        unit: usize,
        line: String,
    },

    /// Line is nested deeper than the grammar has levels for.
    #[error("Line has {level} indent(s) but the grammar supports at most {max}: '{line}'")]
    TooDeep {
        level: usize,
        max: usize,
        line: String,
    },

    /// An exclusion-listed reference appeared below the root level.
    #[error("Reference '{token}' is on the exclusion list and must not be indented: '{line}'")]
    IndentedExclusion { token: String, line: String },

    /// The token found on a line does not fit the pattern of its level.
    #[error("Line has {level} indent(s) and its reference '{token}' should match {pattern}: '{line}'")]
    LevelMismatch {
        level: usize,
        token: String,
        pattern: String,
        line: String,
    },

    /// Reference does not satisfy the grammar.
    #[error("Invalid reference: '{0}'")]
    InvalidReference(String),

    /// Parent requested for the root (empty) reference.
    #[error("Unable to get the parent of '{0}': the root has no parent")]
    NoParent(String),

    /// Carry-forward derivation produced a reference the grammar rejects.
    #[error("Unable to construct a valid full reference for record {index} ('{reference}'): {text}")]
    InvalidDerivedReference {
        index: usize,
        reference: String,
        text: String,
    },

    /// A record handed to tree construction has an invalid full reference.
    #[error("Record {index} has invalid reference '{reference}': {text}")]
    InvalidRecordReference {
        index: usize,
        reference: String,
        text: String,
    },

    /// Reference is valid but absent from the tree.
    #[error("Node with path '{0}' does not exist in the tree")]
    NotFound(String),

    /// A leaf clause is still over the token budget.
    #[error("Node '{reference}' has no children but has a token count of {tokens} (budget {budget})")]
    BudgetExceeded {
        reference: String,
        tokens: usize,
        budget: usize,
    },

    /// A side-channel block was never closed.
    #[error("Formatting issue with '{block}': reached the end of the input before finding '{terminator}'")]
    UnterminatedBlock { block: String, terminator: String },

    /// A side-channel block ran past the line limit.
    #[error("Formatting issue with '{block}': more than {limit} lines before finding '{terminator}'")]
    BlockTooLong {
        block: String,
        limit: usize,
        terminator: String,
    },

    /// A grammar pattern failed to compile.
    #[error("Invalid grammar pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration is structurally unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ClauseTreeError {
    /// Whether this is a formatting error in the source text.
    #[must_use]
    pub fn is_formatting(&self) -> bool {
        matches!(
            self,
            Self::Indentation { .. }
                | Self::TooDeep { .. }
                | Self::IndentedExclusion { .. }
                | Self::LevelMismatch { .. }
        )
    }
}

/// Result type alias for clause-tree operations.
pub type Result<T> = std::result::Result<T, ClauseTreeError>;
