//! Token-bounded splitting of a reference tree into chunks.
//!
//! A node whose rendered text (own subtree plus ancestor context) fits the
//! budget becomes a chunk; a larger node is replaced by its children.

mod counter;
mod engine;
mod types;

pub use counter::{CharRatioCounter, TokenCounter, WordCounter, DEFAULT_CHARS_PER_TOKEN};
pub use engine::SplitEngine;
pub use types::Chunk;
