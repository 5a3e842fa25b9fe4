//! Text renderings of the tree.

use super::node::NodeId;
use super::reference_tree::ReferenceTree;

impl ReferenceTree {
    /// Draw the tree, one `token [heading]` line per node.
    ///
    /// ```text
    /// BA [Banks Act]
    /// +-- 23 []
    ///     |-- (1) [Definitions]
    ///     +-- (2) []
    /// ```
    #[must_use]
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        self.render_ascii_node(self.root(), "", None, &mut out);
        out
    }

    fn render_ascii_node(&self, id: NodeId, indent: &str, is_last: Option<bool>, out: &mut String) {
        let node = self.node(id);
        let connector = match is_last {
            None => "",
            Some(true) => "+-- ",
            Some(false) => "|-- ",
        };
        out.push_str(&format!("{indent}{connector}{} [{}]\n", node.token(), node.heading()));

        let child_indent = match is_last {
            None => String::new(),
            Some(true) => format!("{indent}    "),
            Some(false) => format!("{indent}|   "),
        };
        let children = node.children();
        for (i, child) in children.iter().enumerate() {
            self.render_ascii_node(*child, &child_indent, Some(i + 1 == children.len()), out);
        }
    }

    /// List the headings of the document as an indented outline.
    ///
    /// Children of a node are listed only if at least one of them has a
    /// heading; each level is indented by four spaces. Exclusion-listed
    /// entries directly under the root are printed without heading.
    #[must_use]
    pub fn heading_outline(&self) -> String {
        let mut out = String::new();
        self.outline_children(self.root(), 0, &mut out);
        out
    }

    fn outline_children(&self, id: NodeId, indent: usize, out: &mut String) {
        let children = self.node(id).children();
        if !children.iter().any(|c| !self.node(*c).heading().is_empty()) {
            return;
        }

        for child_id in children {
            let child = self.node(*child_id);
            let bare = id == self.root() && self.grammar().is_excluded(child.token());
            out.push_str(&" ".repeat(indent));
            out.push_str(child.token());
            if !bare && !child.heading().is_empty() {
                out.push(' ');
                out.push_str(child.heading());
            }
            out.push('\n');
            self.outline_children(*child_id, indent + 4, out);
        }
    }
}
