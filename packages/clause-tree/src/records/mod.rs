//! Corpus-to-records transformation.
//!
//! Turns an ordered sequence of text lines into [`LineRecord`]s, each with
//! a locally scoped token and a derived full (root-to-node) reference.
//! Non-text side-channel blocks are lifted out beforehand by
//! [`extract_blocks`].

mod blocks;
mod transform;
mod types;

pub use blocks::{extract_blocks, NonTextBlock};
pub use transform::{derive_full_references, strip_markers, transform_lines, LineMarkers};
pub use types::LineRecord;
