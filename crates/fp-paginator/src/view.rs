//! Pagination controls.
//!
//! One logical view with two render targets: an identical widget is
//! attached at each end of the feed, and every repaint updates both from
//! the shared session state, so the copies can never disagree.

use fp_dom::{DomError, DomResult, NodeId, Selector};
use fp_page::Page;

/// Well-known identity of the top widget. Any pre-existing element with
/// this id is removed before a fresh widget is inserted.
pub const TOP_WIDGET_ID: &str = "feed-pagination";
/// Identity of the bottom duplicate.
pub const BOTTOM_WIDGET_ID: &str = "feed-pagination-bottom";
/// Marker class added to posts under pagination control.
pub const PAGINATED_CLASS: &str = "paginated-post";

const PREV_LABEL: &str = "\u{2190} Previous";
const NEXT_LABEL: &str = "Next \u{2192}";

/// One attached widget: the nodes rendering needs to touch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WidgetHandle {
    pub(crate) root: NodeId,
    pub(crate) label: NodeId,
    pub(crate) prev: NodeId,
    pub(crate) next: NodeId,
}

/// The pagination view: shared state, multiple render targets.
#[derive(Debug, Default)]
pub(crate) struct PaginationView {
    targets: Vec<WidgetHandle>,
}

impl PaginationView {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn targets(&self) -> &[WidgetHandle] {
        &self.targets
    }

    pub(crate) fn clear(&mut self) {
        self.targets.clear();
    }

    /// Check whether a node is one of our "previous" buttons.
    pub(crate) fn is_prev(&self, node: NodeId) -> bool {
        self.targets().iter().any(|t| t.prev == node)
    }

    /// Check whether a node is one of our "next" buttons.
    pub(crate) fn is_next(&self, node: NodeId) -> bool {
        self.targets().iter().any(|t| t.next == node)
    }

    /// Build one detached widget subtree.
    fn build_widget(page: &mut Page, id: &str) -> DomResult<WidgetHandle> {
        let tree = page.tree_mut();
        let root = tree.create_element_with("div", &[("id", id)]);
        let wrapper = tree.create_element_with("div", &[("class", "pagination-wrapper")]);
        let prev = tree.create_element_with("button", &[("class", "pagination-btn prev-btn")]);
        let label = tree.create_element_with("span", &[("class", "page-label")]);
        let next = tree.create_element_with("button", &[("class", "pagination-btn next-btn")]);

        tree.set_text(prev, PREV_LABEL)?;
        tree.set_text(next, NEXT_LABEL)?;
        tree.append_child(root, wrapper)?;
        tree.append_child(wrapper, prev)?;
        tree.append_child(wrapper, label)?;
        tree.append_child(wrapper, next)?;

        Ok(WidgetHandle {
            root,
            label,
            prev,
            next,
        })
    }

    /// Find the handle nodes inside a widget subtree.
    fn resolve(page: &Page, root: NodeId) -> Option<WidgetHandle> {
        let tree = page.tree();
        let label = tree.query_selector(root, &Selector::parse(".page-label")?)?;
        let prev = tree.query_selector(root, &Selector::parse(".prev-btn")?)?;
        let next = tree.query_selector(root, &Selector::parse(".next-btn")?)?;
        Some(WidgetHandle {
            root,
            label,
            prev,
            next,
        })
    }

    /// Remove stale widgets and attach fresh top and bottom copies to
    /// the feed container.
    pub(crate) fn attach(&mut self, page: &mut Page, feed: NodeId) -> DomResult<()> {
        self.targets.clear();
        for stale in [TOP_WIDGET_ID, BOTTOM_WIDGET_ID] {
            if let Some(node) = page.document().get_element_by_id(stale) {
                if let Some(parent) = page.tree().get(node).and_then(|n| n.parent) {
                    page.remove_child(parent, node)?;
                }
            }
        }

        let top = Self::build_widget(page, TOP_WIDGET_ID)?;
        let first = page.tree().get(feed).and_then(|n| n.first_child);
        page.insert_before(feed, top.root, first)?;

        // The bottom widget is a deep copy with its own identity.
        let bottom_root = page.tree_mut().clone_node(top.root, true)?;
        page.set_attribute(bottom_root, "id", BOTTOM_WIDGET_ID)?;
        let bottom = Self::resolve(page, bottom_root).ok_or(DomError::NotFound)?;
        page.append_child(feed, bottom.root)?;

        self.targets.push(top);
        self.targets.push(bottom);
        Ok(())
    }

    /// Repaint every target from the shared page index and total.
    pub(crate) fn render(&self, page: &mut Page, page_index: usize, total_pages: usize) -> DomResult<()> {
        for target in &self.targets {
            page.set_text(target.label, &format!("{page_index} of {total_pages}"))?;
            set_disabled(page, target.prev, page_index <= 1)?;
            set_disabled(page, target.next, page_index >= total_pages)?;
        }
        Ok(())
    }
}

fn set_disabled(page: &mut Page, node: NodeId, disabled: bool) -> DomResult<()> {
    if disabled {
        page.set_attribute(node, "disabled", "")
    } else {
        page.remove_attribute(node, "disabled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_dom::Document;

    fn feed_page() -> (Page, NodeId) {
        let mut document = Document::new("https://www.instagram.com/");
        let body = document.body().unwrap();
        let main = document
            .tree_mut()
            .create_element_with("main", &[("role", "main")]);
        document.tree_mut().append_child(body, main).unwrap();
        let post = document
            .tree_mut()
            .create_element_with("article", &[("role", "presentation")]);
        document.tree_mut().append_child(main, post).unwrap();
        (Page::from_document(document).unwrap(), main)
    }

    #[test]
    fn test_attach_inserts_top_and_bottom() {
        let (mut page, feed) = feed_page();
        let mut view = PaginationView::new();
        view.attach(&mut page, feed).unwrap();

        let children: Vec<NodeId> = page.tree().children(feed).collect();
        assert_eq!(children.first().copied(), Some(view.targets()[0].root));
        assert_eq!(children.last().copied(), Some(view.targets()[1].root));

        let top = page.tree().element(view.targets()[0].root).unwrap();
        let bottom = page.tree().element(view.targets()[1].root).unwrap();
        assert_eq!(top.id(), Some(TOP_WIDGET_ID));
        assert_eq!(bottom.id(), Some(BOTTOM_WIDGET_ID));

        // Buttons carry their captions.
        assert_eq!(
            page.tree().text_content(view.targets()[0].prev),
            "\u{2190} Previous"
        );
        assert_eq!(
            page.tree().text_content(view.targets()[1].next),
            "Next \u{2192}"
        );
    }

    #[test]
    fn test_reattach_replaces_stale_widgets() {
        let (mut page, feed) = feed_page();
        let mut view = PaginationView::new();
        view.attach(&mut page, feed).unwrap();
        view.attach(&mut page, feed).unwrap();

        let sel = Selector::parse(".pagination-wrapper").unwrap();
        let root = page.tree().root();
        assert_eq!(page.tree().query_selector_all(root, &sel).len(), 2);
    }

    #[test]
    fn test_render_updates_both_targets() {
        let (mut page, feed) = feed_page();
        let mut view = PaginationView::new();
        view.attach(&mut page, feed).unwrap();

        view.render(&mut page, 1, 3).unwrap();
        for target in view.targets() {
            assert_eq!(page.tree().text_content(target.label), "1 of 3");
            assert!(page.tree().element(target.prev).unwrap().has_attr("disabled"));
            assert!(!page.tree().element(target.next).unwrap().has_attr("disabled"));
        }

        view.render(&mut page, 3, 3).unwrap();
        for target in view.targets() {
            assert_eq!(page.tree().text_content(target.label), "3 of 3");
            assert!(!page.tree().element(target.prev).unwrap().has_attr("disabled"));
            assert!(page.tree().element(target.next).unwrap().has_attr("disabled"));
        }
    }

    #[test]
    fn test_render_with_no_posts_disables_both() {
        let (mut page, feed) = feed_page();
        let mut view = PaginationView::new();
        view.attach(&mut page, feed).unwrap();

        view.render(&mut page, 1, 0).unwrap();
        for target in view.targets() {
            assert_eq!(page.tree().text_content(target.label), "1 of 0");
            assert!(page.tree().element(target.prev).unwrap().has_attr("disabled"));
            assert!(page.tree().element(target.next).unwrap().has_attr("disabled"));
        }
    }

    #[test]
    fn test_click_ownership() {
        let (mut page, feed) = feed_page();
        let mut view = PaginationView::new();
        view.attach(&mut page, feed).unwrap();

        assert!(view.is_prev(view.targets()[0].prev));
        assert!(view.is_next(view.targets()[1].next));
        assert!(!view.is_prev(feed));
    }
}
