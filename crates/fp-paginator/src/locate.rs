//! Feed locator.
//!
//! Finds the current set of post elements within the page's main content
//! region. Absence is not an error: an empty result means "not ready
//! yet" and callers poll again.

use fp_dom::{NodeId, Selector};
use fp_page::Page;

use crate::PaginatorConfig;

/// Compiled host-page selectors.
#[derive(Debug, Clone)]
pub(crate) struct FeedQuery {
    feed: Selector,
    post: Selector,
}

impl FeedQuery {
    /// Compile the configured selectors. `None` if either is outside the
    /// supported grammar.
    pub(crate) fn compile(config: &PaginatorConfig) -> Option<Self> {
        Some(Self {
            feed: Selector::parse(&config.feed_selector)?,
            post: Selector::parse(&config.post_selector)?,
        })
    }

    /// The single main content region, if present.
    pub(crate) fn locate_feed(&self, page: &Page) -> Option<NodeId> {
        let root = page.tree().root();
        page.tree().query_selector(root, &self.feed)
    }

    /// All post elements within the feed, in document order.
    pub(crate) fn locate_posts(&self, page: &Page) -> Vec<NodeId> {
        match self.locate_feed(page) {
            Some(feed) => page.tree().query_selector_all(feed, &self.post),
            None => Vec::new(),
        }
    }

    /// Check one node against the post marker.
    pub(crate) fn is_post(&self, page: &Page, node: NodeId) -> bool {
        page.tree().matches(node, &self.post)
    }
}
