//! DOM tree (arena-based allocation).
//!
//! Nodes are never freed: removal detaches a subtree from its parent
//! links but leaves it in the arena, so stale `NodeId`s stay resolvable.

use crate::{DomError, DomResult, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree holding only the document root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// Root node ID.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Get element data by ID.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Get mutable element data by ID.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Number of nodes in the arena (including detached ones).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::new(NodeData::Element(ElementData::new(tag))))
    }

    /// Create a detached element with attributes.
    pub fn create_element_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut data = ElementData::new(tag);
        for (name, value) in attrs {
            data.set_attr(name, value);
        }
        self.push(Node::new(NodeData::Element(data)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Text(content.to_string())))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Comment(content.to_string())))
    }

    /// Append a child as the last child of `parent`.
    ///
    /// A child already attached elsewhere is detached first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check_insertable(parent, child)?;
        self.detach(child);

        let prev = self.nodes[parent.index()].last_child;
        if let Some(prev) = prev {
            self.nodes[prev.index()].next_sibling = Some(child);
        } else {
            self.nodes[parent.index()].first_child = Some(child);
        }
        let node = &mut self.nodes[child.index()];
        node.parent = Some(parent);
        node.prev_sibling = prev;
        node.next_sibling = None;
        self.nodes[parent.index()].last_child = Some(child);
        Ok(())
    }

    /// Insert `child` into `parent` before `reference`.
    ///
    /// `None` for `reference` appends, matching `insertBefore` semantics.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        let Some(reference) = reference else {
            return self.append_child(parent, child);
        };
        self.check_insertable(parent, child)?;
        if self.get(reference).ok_or(DomError::NotFound)?.parent != Some(parent) {
            return Err(DomError::NotAChild);
        }
        self.detach(child);

        let prev = self.nodes[reference.index()].prev_sibling;
        if let Some(prev) = prev {
            self.nodes[prev.index()].next_sibling = Some(child);
        } else {
            self.nodes[parent.index()].first_child = Some(child);
        }
        let node = &mut self.nodes[child.index()];
        node.parent = Some(parent);
        node.prev_sibling = prev;
        node.next_sibling = Some(reference);
        self.nodes[reference.index()].prev_sibling = Some(child);
        Ok(())
    }

    /// Remove `child` from `parent`, detaching its subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.get(parent).is_none() {
            return Err(DomError::NotFound);
        }
        if self.get(child).ok_or(DomError::NotFound)?.parent != Some(parent) {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        Ok(())
    }

    /// Unlink a node from its parent and siblings. No-op when detached.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        let Some(parent) = parent else { return };

        match prev {
            Some(prev) => self.nodes[prev.index()].next_sibling = next,
            None => self.nodes[parent.index()].first_child = next,
        }
        match next {
            Some(next) => self.nodes[next.index()].prev_sibling = prev,
            None => self.nodes[parent.index()].last_child = prev,
        }
        let node = &mut self.nodes[id.index()];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// Clone a node into a new detached node. `deep` clones the subtree.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> DomResult<NodeId> {
        let data = self.get(id).ok_or(DomError::NotFound)?.data.clone();
        let copy = self.push(Node::new(data));
        if deep {
            let children: Vec<NodeId> = self.children(id).collect();
            for child in children {
                let child_copy = self.clone_node(child, true)?;
                self.append_child(copy, child_copy)?;
            }
        }
        Ok(copy)
    }

    /// Replace the children of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, content: &str) -> DomResult<()> {
        if self.get(id).is_none() {
            return Err(DomError::NotFound);
        }
        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            self.detach(child);
        }
        let text = self.create_text(content);
        self.append_child(id, text)
    }

    /// Concatenated text of the node and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
        }
        for desc in self.descendants(id) {
            if let Some(text) = self.get(desc).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }

    /// Iterate over direct children in order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).and_then(|n| n.first_child),
        }
    }

    /// Iterate over all descendants in document (pre-)order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Iterate over ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).and_then(|n| n.parent),
        }
    }

    /// Check whether `ancestor` strictly contains `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    fn check_insertable(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound)?;
        if self.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        if !matches!(parent_node.data, NodeData::Document | NodeData::Element(_)) {
            return Err(DomError::InvalidNodeType);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children.
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.get(id).and_then(|n| n.next_sibling);
        Some(id)
    }
}

/// Depth-first pre-order iterator over descendants.
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let children: Vec<NodeId> = self.tree.children(id).collect();
        for child in children.into_iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

/// Iterator over ancestors, nearest first.
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.get(id).and_then(|n| n.parent);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_children_order() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("c");

        tree.append_child(tree.root(), a).unwrap();
        tree.append_child(tree.root(), b).unwrap();
        tree.append_child(tree.root(), c).unwrap();

        let order: Vec<NodeId> = tree.children(tree.root()).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn test_insert_before_first_child() {
        let mut tree = DomTree::new();
        let parent = tree.create_element("main");
        tree.append_child(tree.root(), parent).unwrap();
        let a = tree.create_element("article");
        tree.append_child(parent, a).unwrap();

        let widget = tree.create_element("div");
        let first = tree.get(parent).unwrap().first_child;
        tree.insert_before(parent, widget, first).unwrap();

        let order: Vec<NodeId> = tree.children(parent).collect();
        assert_eq!(order, vec![widget, a]);
    }

    #[test]
    fn test_remove_child_detaches_subtree() {
        let mut tree = DomTree::new();
        let parent = tree.create_element("main");
        let child = tree.create_element("article");
        tree.append_child(tree.root(), parent).unwrap();
        tree.append_child(parent, child).unwrap();

        tree.remove_child(parent, child).unwrap();
        assert_eq!(tree.children(parent).count(), 0);
        assert_eq!(tree.get(child).unwrap().parent, None);

        // Removing twice is NotAChild, not a panic.
        assert_eq!(tree.remove_child(parent, child), Err(DomError::NotAChild));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        tree.append_child(tree.root(), outer).unwrap();
        tree.append_child(outer, inner).unwrap();

        assert_eq!(
            tree.append_child(inner, outer),
            Err(DomError::HierarchyRequest)
        );
        assert_eq!(tree.append_child(inner, inner), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_text_parent_rejected() {
        let mut tree = DomTree::new();
        let text = tree.create_text("hi");
        let elem = tree.create_element("span");
        tree.append_child(tree.root(), text).unwrap();

        assert_eq!(tree.append_child(text, elem), Err(DomError::InvalidNodeType));
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let mut tree = DomTree::new();
        let widget = tree.create_element_with("div", &[("id", "feed-pagination")]);
        let button = tree.create_element_with("button", &[("class", "pagination-btn")]);
        tree.append_child(widget, button).unwrap();
        let label = tree.create_text("1 of 3");
        tree.append_child(button, label).unwrap();

        let copy = tree.clone_node(widget, true).unwrap();
        assert_ne!(copy, widget);
        assert_eq!(tree.get(copy).unwrap().parent, None);
        assert_eq!(tree.children(copy).count(), 1);

        // Mutating the copy leaves the original untouched.
        tree.element_mut(copy).unwrap().set_attr("id", "feed-pagination-bottom");
        assert_eq!(tree.element(widget).unwrap().id(), Some("feed-pagination"));
        assert_eq!(tree.element(copy).unwrap().id(), Some("feed-pagination-bottom"));
        assert_eq!(tree.text_content(copy), "1 of 3");
    }

    #[test]
    fn test_set_text_replaces_children() {
        let mut tree = DomTree::new();
        let span = tree.create_element("span");
        tree.append_child(tree.root(), span).unwrap();
        tree.set_text(span, "1 of 3").unwrap();
        tree.set_text(span, "2 of 3").unwrap();

        assert_eq!(tree.children(span).count(), 1);
        assert_eq!(tree.text_content(span), "2 of 3");
    }

    #[test]
    fn test_descendants_document_order() {
        let mut tree = DomTree::new();
        let main = tree.create_element("main");
        let a = tree.create_element("article");
        let a_text = tree.create_text("a");
        let b = tree.create_element("article");
        tree.append_child(tree.root(), main).unwrap();
        tree.append_child(main, a).unwrap();
        tree.append_child(a, a_text).unwrap();
        tree.append_child(main, b).unwrap();

        let order: Vec<NodeId> = tree.descendants(tree.root()).collect();
        assert_eq!(order, vec![main, a, a_text, b]);
        assert!(tree.is_ancestor(main, a_text));
        assert!(!tree.is_ancestor(a, b));
    }
}
