//! Document - high-level document API.

use crate::{DomTree, Node, NodeId};

/// HTML document: a DOM tree plus cached structural elements.
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    url: String,
    html_element: Option<NodeId>,
    body_element: Option<NodeId>,
}

impl Document {
    /// Create a document with the basic html/head/body skeleton.
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Skeleton construction cannot cycle, so these cannot fail.
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: Some(html),
            body_element: Some(body),
        }
    }

    /// Create an empty document (root only, no structure).
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: None,
            body_element: None,
        }
    }

    /// Re-scan the tree for the html/body elements. Called after bulk
    /// construction (e.g. by the HTML parser).
    pub fn finalize(&mut self) {
        self.html_element = self
            .tree
            .children(self.tree.root())
            .find(|&id| self.tag_is(id, "html"));
        self.body_element = self.html_element.and_then(|html| {
            self.tree.children(html).find(|&id| self.tag_is(id, "body"))
        });
    }

    fn tag_is(&self, id: NodeId, tag: &str) -> bool {
        self.tree
            .get(id)
            .and_then(Node::as_element)
            .is_some_and(|e| e.tag == tag)
    }

    /// Document URL as given at construction.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The `<html>` element, if present.
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element
    }

    /// The `<body>` element, if present.
    pub fn body(&self) -> Option<NodeId> {
        self.body_element
    }

    /// Document title, from the first `<title>` element.
    pub fn title(&self) -> String {
        self.tree
            .descendants(self.tree.root())
            .find(|&id| self.tag_is(id, "title"))
            .map(|id| self.tree.text_content(id))
            .unwrap_or_default()
    }

    /// First attached element with the given id attribute.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).find(|&node| {
            self.tree
                .get(node)
                .and_then(Node::as_element)
                .is_some_and(|e| e.id() == Some(id))
        })
    }

    /// Access the DOM tree.
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably.
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let doc = Document::new("https://example.com/");
        assert!(doc.document_element().is_some());
        assert!(doc.body().is_some());
        assert_eq!(doc.url(), "https://example.com/");
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new("about:blank");
        let body = doc.body().unwrap();
        let div = doc.tree_mut().create_element_with("div", &[("id", "feed")]);
        doc.tree_mut().append_child(body, div).unwrap();

        assert_eq!(doc.get_element_by_id("feed"), Some(div));
        assert_eq!(doc.get_element_by_id("missing"), None);

        // Detached elements are not reachable by id.
        doc.tree_mut().remove_child(body, div).unwrap();
        assert_eq!(doc.get_element_by_id("feed"), None);
    }

    #[test]
    fn test_title() {
        let mut doc = Document::new("about:blank");
        let html = doc.document_element().unwrap();
        let head = doc.tree().children(html).next().unwrap();
        let title = doc.tree_mut().create_element("title");
        doc.tree_mut().append_child(head, title).unwrap();
        doc.tree_mut().set_text(title, "Feed").unwrap();

        assert_eq!(doc.title(), "Feed");
    }
}
