//! Paginator configuration.

/// Tuning knobs and host-page markers for one paginator session.
///
/// Defaults mirror the feed this was built against; the selectors and
/// the feed root are the only host-specific pieces.
#[derive(Debug, Clone)]
pub struct PaginatorConfig {
    /// Posts shown per page.
    pub page_size: usize,
    /// Discovery poll interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Discovery gives up after this long with no posts found.
    pub discovery_timeout_ms: u64,
    /// Settle delay between observing new posts and re-rendering.
    pub refresh_debounce_ms: u64,
    /// Delay before discovery re-runs after returning to the feed root,
    /// giving the host time to rebuild the feed.
    pub rearm_delay_ms: u64,
    /// Exact URL of the feed root page.
    pub feed_root: String,
    /// Selector for the single main content region.
    pub feed_selector: String,
    /// Selector for post elements within the feed.
    pub post_selector: String,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            poll_interval_ms: 1_000,
            discovery_timeout_ms: 30_000,
            refresh_debounce_ms: 100,
            rearm_delay_ms: 1_000,
            feed_root: "https://www.instagram.com/".to_string(),
            feed_selector: r#"main[role="main"]"#.to_string(),
            post_selector: r#"article[role="presentation"]"#.to_string(),
        }
    }
}

impl PaginatorConfig {
    /// Total pages for a post count: `ceil(count / page_size)`, so an
    /// empty collection has zero pages.
    pub fn total_pages(&self, post_count: usize) -> usize {
        post_count.div_ceil(self.page_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PaginatorConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.poll_interval_ms, 1_000);
        assert_eq!(config.discovery_timeout_ms, 30_000);
        assert_eq!(config.refresh_debounce_ms, 100);
        assert_eq!(config.rearm_delay_ms, 1_000);
    }

    #[test]
    fn test_total_pages() {
        let config = PaginatorConfig::default();
        assert_eq!(config.total_pages(0), 0);
        assert_eq!(config.total_pages(1), 1);
        assert_eq!(config.total_pages(10), 1);
        assert_eq!(config.total_pages(11), 2);
        assert_eq!(config.total_pages(25), 3);
    }
}
