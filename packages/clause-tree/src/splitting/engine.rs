//! Split engine walking a reference tree against a token budget.

use super::counter::TokenCounter;
use super::types::Chunk;
use crate::context::ContextRenderer;
use crate::error::{ClauseTreeError, Result};
use crate::tree::{NodeId, ReferenceTree};

/// Engine for splitting a tree into chunks that fit a token budget.
///
/// Every candidate node is rendered with its ancestor context and counted
/// once. Nodes within budget become chunks; larger nodes are replaced by
/// their children, in order.
pub struct SplitEngine<'a, C: TokenCounter> {
    tree: &'a ReferenceTree,
    renderer: ContextRenderer<'a>,
    counter: C,
}

impl<'a, C: TokenCounter> SplitEngine<'a, C> {
    /// Create a new split engine.
    #[must_use]
    pub fn new(tree: &'a ReferenceTree, renderer: ContextRenderer<'a>, counter: C) -> Self {
        Self {
            tree,
            renderer,
            counter,
        }
    }

    /// Split the subtree at `start` into chunks of at most `budget` tokens.
    ///
    /// Chunks come out in pre-order and together cover the subtree once.
    ///
    /// # Errors
    /// * `BudgetExceeded` if a leaf alone is over budget
    /// * `InvalidReference` if a node's context cannot be rendered
    pub fn split(&self, start: NodeId, budget: usize) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::new();
        self.split_node(start, budget, &mut chunks)?;
        tracing::info!(
            start = %self.tree.node(start).full_reference(),
            budget,
            chunks = chunks.len(),
            "Split tree into chunks"
        );
        Ok(chunks)
    }

    fn split_node(&self, id: NodeId, budget: usize, chunks: &mut Vec<Chunk>) -> Result<()> {
        let node = self.tree.node(id);
        let reference = node.full_reference();
        let text = self.renderer.render(reference)?;
        let tokens = self.counter.count(&text);

        if tokens <= budget {
            tracing::debug!(reference = %reference, tokens, "Emitting chunk");
            chunks.push(Chunk::new(reference, text, tokens));
            return Ok(());
        }

        if node.is_leaf() {
            return Err(ClauseTreeError::BudgetExceeded {
                reference: reference.to_string(),
                tokens,
                budget,
            });
        }

        tracing::debug!(
            reference = %reference,
            tokens,
            children = node.children().len(),
            "Node over budget, descending"
        );
        for child in node.children() {
            self.split_node(*child, budget, chunks)?;
        }
        Ok(())
    }
}
