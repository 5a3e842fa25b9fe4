//! Tree node and node handle.

use std::collections::HashMap;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position in the arena (the root is 0).
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the reference tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    token: String,
    full_reference: String,
    heading: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    child_by_token: HashMap<String, NodeId>,
}

impl TreeNode {
    pub(crate) fn new(
        token: impl Into<String>,
        full_reference: impl Into<String>,
        heading: impl Into<String>,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            token: token.into(),
            full_reference: full_reference.into(),
            heading: heading.into(),
            parent,
            children: Vec::new(),
            child_by_token: HashMap::new(),
        }
    }

    /// Local token, or the root identifier for the root.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Root-to-node reference; empty for the root.
    #[must_use]
    pub fn full_reference(&self) -> &str {
        &self.full_reference
    }

    /// Heading text, possibly empty.
    #[must_use]
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn child(&self, token: &str) -> Option<NodeId> {
        self.child_by_token.get(token).copied()
    }

    pub(crate) fn push_child(&mut self, token: &str, id: NodeId) {
        self.child_by_token.insert(token.to_string(), id);
        self.children.push(id);
    }

    /// Set the heading unless one is already present.
    pub(crate) fn fill_heading(&mut self, heading: &str) {
        if self.heading.is_empty() {
            self.heading = heading.to_string();
        }
    }

    pub(crate) fn replace_heading(&mut self, heading: &str) {
        self.heading = heading.to_string();
    }
}
