//! Output of the splitter.

use serde::Serialize;

/// A subtree whose rendered text fits the token budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// Full reference of the subtree root; empty for the tree root.
    pub reference: String,

    /// Rendered text including ancestor context.
    pub text: String,

    /// Tokens in `text`.
    pub token_count: usize,
}

impl Chunk {
    /// Create a new chunk.
    #[must_use]
    pub fn new(reference: impl Into<String>, text: impl Into<String>, token_count: usize) -> Self {
        Self {
            reference: reference.into(),
            text: text.into(),
            token_count,
        }
    }
}
