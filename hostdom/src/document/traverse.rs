use super::{Document, NodeId};
use crate::error::Result;
use crate::selector::Selector;

impl Document {
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    /// All child nodes, text included.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
            .collect()
    }

    fn sibling_at(&self, node: NodeId, offset: isize) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|s| *s == node)?;
        let index = index.checked_add_signed(offset)?;
        siblings.get(index).copied()
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.sibling_at(node, 1)
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.sibling_at(node, -1)
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let mut cursor = self.next_sibling(node);
        while let Some(current) = cursor {
            if self.is_element(current) {
                return Some(current);
            }
            cursor = self.next_sibling(current);
        }
        None
    }

    pub fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let mut cursor = self.previous_sibling(node);
        while let Some(current) = cursor {
            if self.is_element(current) {
                return Some(current);
            }
            cursor = self.previous_sibling(current);
        }
        None
    }

    /// Ancestors from the parent up to the topmost node.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            out.push(current);
            cursor = self.parent(current);
        }
        out
    }

    /// True if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root(), node)
    }

    /// `node` and every node below it, in tree order.
    pub(crate) fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        out
    }

    /// Descendant elements of `node` in tree order, `node` excluded.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.subtree(node)
            .into_iter()
            .skip(1)
            .filter(|n| self.is_element(*n))
            .collect()
    }

    /// First connected element with the given `id`, in tree order.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|n| self.get_attribute(*n, "id") == Some(id))
    }

    /// True if any element, connected or not, carries this `id`.
    pub fn id_in_use(&self, id: &str) -> bool {
        (0..self.nodes.len()).any(|index| self.get_attribute(NodeId(index), "id") == Some(id))
    }

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        selector.matches(self, node)
    }

    /// Descendants of `scope` matching `selector`, in tree order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| selector.matches(self, *n))
            .collect()
    }

    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| selector.matches(self, *n))
    }

    /// Parse `selector` and run [`Document::query_selector_all`].
    pub fn query_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let selector: Selector = selector.parse()?;
        Ok(self.query_selector_all(scope, &selector))
    }
}
