//! Reference tree built from the record sequence.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]; each node keeps
//! its parent id and an ordered list of children keyed by local token.

mod node;
mod render;
mod reference_tree;

pub use node::{NodeId, TreeNode};
pub use reference_tree::{build_tree, ReferenceTree};
