//! Arena-backed tree keyed by full references.

use super::node::{NodeId, TreeNode};
use crate::error::{ClauseTreeError, Result};
use crate::grammar::ReferenceGrammar;
use crate::records::LineRecord;

const ROOT: NodeId = NodeId(0);

/// Ordered tree of references.
///
/// Nodes are created on first encounter of their full reference and never
/// removed. A node's heading may be filled in once and is never overwritten
/// afterwards.
///
/// # Examples
/// ```
/// use clause_tree::config::GrammarConfig;
/// use clause_tree::grammar::ReferenceGrammar;
/// use clause_tree::tree::ReferenceTree;
///
/// let grammar = ReferenceGrammar::new(&GrammarConfig::banking_act()).unwrap();
/// let mut tree = ReferenceTree::new("BA", grammar);
/// tree.add("23(1)(a)", "Introduction").unwrap();
///
/// let id = tree.get("23(1)(a)").unwrap();
/// assert_eq!(tree.node(id).heading(), "Introduction");
/// assert_eq!(tree.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceTree {
    nodes: Vec<TreeNode>,
    grammar: ReferenceGrammar,
}

impl ReferenceTree {
    /// Create a tree holding only the root.
    #[must_use]
    pub fn new(root_id: impl Into<String>, grammar: ReferenceGrammar) -> Self {
        Self {
            nodes: vec![TreeNode::new(root_id, "", "", None)],
            grammar,
        }
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Identifier the root was created with.
    #[must_use]
    pub fn root_id(&self) -> &str {
        self.nodes[ROOT.0].token()
    }

    /// Grammar used to decompose references.
    #[must_use]
    pub fn grammar(&self) -> &ReferenceGrammar {
        &self.grammar
    }

    /// Borrow a node.
    ///
    /// # Panics
    /// If `id` was not handed out by this tree and lies past its last node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Add the path for `full_reference`, creating missing nodes.
    ///
    /// The root identifier itself sets the root heading. For any other
    /// reference the last node's heading is set only if it is still empty.
    ///
    /// # Errors
    /// `InvalidReference` if the reference fails the grammar.
    pub fn add(&mut self, full_reference: &str, heading: &str) -> Result<NodeId> {
        if full_reference == self.root_id() {
            self.nodes[ROOT.0].replace_heading(heading);
            return Ok(ROOT);
        }
        if !self.grammar.is_valid(full_reference) {
            return Err(ClauseTreeError::InvalidReference(full_reference.to_string()));
        }

        let tokens = self.grammar.split(full_reference)?;
        let mut current = ROOT;
        let mut path = String::new();

        for token in tokens {
            path.push_str(token);
            current = match self.nodes[current.0].child(token) {
                Some(child) => child,
                None => {
                    let id = NodeId(self.nodes.len());
                    self.nodes.push(TreeNode::new(token, path.as_str(), "", Some(current)));
                    self.nodes[current.0].push_child(token, id);
                    id
                }
            };
        }

        self.nodes[current.0].fill_heading(heading);
        Ok(current)
    }

    /// Look up the node for `full_reference`.
    ///
    /// # Errors
    /// * `InvalidReference` if the reference fails the grammar
    /// * `NotFound` if any node on the path is missing
    pub fn get(&self, full_reference: &str) -> Result<NodeId> {
        if full_reference == self.root_id() {
            return Ok(ROOT);
        }
        if !self.grammar.is_valid(full_reference) {
            return Err(ClauseTreeError::InvalidReference(full_reference.to_string()));
        }

        let mut current = ROOT;
        for token in self.grammar.split(full_reference)? {
            current = self.nodes[current.0]
                .child(token)
                .ok_or_else(|| ClauseTreeError::NotFound(full_reference.to_string()))?;
        }
        Ok(current)
    }

    /// Node ids in pre-order (parent before children, children in order).
    #[must_use]
    pub fn pre_order(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children().iter().rev());
        }
        order
    }

    /// Depth of a node below the root.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).parent();
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).parent();
        }
        depth
    }
}

/// Build the tree for a whole record sequence.
///
/// Records are added in order; a heading record contributes its text as
/// the node heading. A single invalid record aborts construction.
///
/// # Errors
/// `InvalidRecordReference` naming the first record that fails the grammar.
pub fn build_tree(
    root_id: &str,
    records: &[LineRecord],
    grammar: &ReferenceGrammar,
) -> Result<ReferenceTree> {
    let mut tree = ReferenceTree::new(root_id, grammar.clone());

    for (index, record) in records.iter().enumerate() {
        let invalid = || ClauseTreeError::InvalidRecordReference {
            index,
            reference: record.full_reference.clone(),
            text: record.text.clone(),
        };
        if !grammar.is_valid(&record.full_reference) {
            tracing::warn!(index, reference = %record.full_reference, "Record has an invalid reference");
            return Err(invalid());
        }
        tree.add(&record.full_reference, record.heading_text())
            .map_err(|_| invalid())?;
    }

    tracing::debug!(nodes = tree.len(), records = records.len(), "Built reference tree");
    Ok(tree)
}
