//! The paginator session.
//!
//! A single state machine drives the whole feature:
//! `Idle -> Discovering -> Active`. Discovery polls the page until posts
//! exist, activation injects the controls and suppresses the host's
//! infinite scroll, and two watchers keep pagination consistent
//! afterwards: a feed mutation observer (debounced refresh when the host
//! appends posts) and a permanent document observer that polls the
//! location on every mutation batch to catch in-page navigation.
//!
//! Time is virtual. The embedder calls `tick` with elapsed milliseconds;
//! every timer lives in the session's own scheduler.

use fp_dom::NodeId;
use fp_page::{
    EventKind, EventTarget, ListenerId, ObserveOptions, ObserverId, Page, ReadyState, Scheduler,
    ScrollAlign, ScrollBehavior, TimerId,
};

use crate::PaginatorConfig;
use crate::locate::FeedQuery;
use crate::view::{PAGINATED_CLASS, PaginationView};

/// Watcher lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    /// Not running: either never started, or discovery timed out.
    Idle,
    /// Polling the page for posts.
    Discovering,
    /// Pagination installed and self-healing.
    Active,
}

/// Scheduled watcher work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatcherTask {
    Poll,
    DiscoveryTimeout,
    Refresh,
    Rearm,
}

/// One paginator session over one page.
pub struct Paginator {
    config: PaginatorConfig,
    query: Option<FeedQuery>,
    state: WatcherState,
    page_index: usize,
    posts: Vec<NodeId>,
    feed: Option<NodeId>,
    view: PaginationView,
    scheduler: Scheduler<WatcherTask>,
    poll_timer: Option<TimerId>,
    timeout_timer: Option<TimerId>,
    refresh_timer: Option<TimerId>,
    rearm_timer: Option<TimerId>,
    feed_observer: Option<ObserverId>,
    nav_observer: Option<ObserverId>,
    scroll_guard: Option<ListenerId>,
    last_href: String,
}

impl Paginator {
    pub fn new(config: PaginatorConfig) -> Self {
        let query = FeedQuery::compile(&config);
        if query.is_none() {
            tracing::warn!("unsupported feed selectors; paginator stays inert");
        }
        Self {
            config,
            query,
            state: WatcherState::Idle,
            page_index: 1,
            posts: Vec::new(),
            feed: None,
            view: PaginationView::new(),
            scheduler: Scheduler::new(),
            poll_timer: None,
            timeout_timer: None,
            refresh_timer: None,
            rearm_timer: None,
            feed_observer: None,
            nav_observer: None,
            scroll_guard: None,
            last_href: String::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WatcherState {
        self.state
    }

    /// Current 1-based page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Size of the last derived post collection.
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Install the paginator on a page: arm the permanent navigation
    /// watcher and, if the document has already loaded, begin discovery.
    pub fn install(&mut self, page: &mut Page) {
        if self.query.is_none() || self.nav_observer.is_some() {
            return;
        }
        self.last_href = page.location().href().to_string();
        let root = page.tree().root();
        self.nav_observer = Some(page.observe(
            root,
            ObserveOptions {
                child_list: true,
                subtree: true,
                ..Default::default()
            },
        ));
        if page.ready_state() == ReadyState::Complete {
            self.begin_discovery();
        }
    }

    /// Notify that the document finished loading. No-op unless the
    /// session is installed and still idle.
    pub fn document_ready(&mut self) {
        if self.nav_observer.is_some() && self.state == WatcherState::Idle {
            self.begin_discovery();
        }
    }

    /// Advance virtual time, run due watcher work, then react to any
    /// mutations the page accumulated.
    pub fn tick(&mut self, page: &mut Page, delta_ms: u64) {
        for (_, task) in self.scheduler.advance(delta_ms) {
            match task {
                WatcherTask::Poll => self.poll(page),
                WatcherTask::DiscoveryTimeout => self.discovery_timeout(),
                WatcherTask::Refresh => self.refresh(page),
                WatcherTask::Rearm => self.begin_discovery(),
            }
        }
        self.process_mutations(page);
    }

    /// Route a click on one of the pagination controls.
    ///
    /// "previous" at page 1 and "next" at the last page are no-ops.
    pub fn handle_click(&mut self, page: &mut Page, target: NodeId) {
        if self.state != WatcherState::Active {
            return;
        }
        let total = self.config.total_pages(self.posts.len());
        if self.view.is_prev(target) {
            if self.page_index > 1 {
                self.page_index -= 1;
                self.render_current(page);
            }
        } else if self.view.is_next(target) && self.page_index < total {
            self.page_index += 1;
            self.render_current(page);
        }
    }

    fn begin_discovery(&mut self) {
        self.cancel_discovery_timers();
        self.state = WatcherState::Discovering;
        self.poll_timer = Some(
            self.scheduler
                .schedule_repeating(WatcherTask::Poll, self.config.poll_interval_ms),
        );
        self.timeout_timer = Some(
            self.scheduler
                .schedule_once(WatcherTask::DiscoveryTimeout, self.config.discovery_timeout_ms),
        );
        tracing::debug!("feed discovery started");
    }

    fn poll(&mut self, page: &mut Page) {
        if self.state != WatcherState::Discovering {
            return;
        }
        let Some(query) = self.query.as_ref() else {
            return;
        };
        let posts = query.locate_posts(page);
        if !posts.is_empty() {
            self.activate(page, posts);
        }
    }

    fn discovery_timeout(&mut self) {
        if self.state != WatcherState::Discovering {
            return;
        }
        // Silent failure: the page never produced a feed.
        self.cancel_discovery_timers();
        self.state = WatcherState::Idle;
        tracing::debug!("feed discovery timed out");
    }

    fn activate(&mut self, page: &mut Page, posts: Vec<NodeId>) {
        let Some(feed) = self.query.as_ref().and_then(|q| q.locate_feed(page)) else {
            return;
        };
        self.cancel_discovery_timers();
        self.posts = posts;
        self.feed = Some(feed);
        self.state = WatcherState::Active;

        if self.view.attach(page, feed).is_err() {
            // The host tree changed under us; degrade to inaction.
            self.view.clear();
            self.state = WatcherState::Idle;
            return;
        }
        self.render_current(page);
        self.suppress_infinite_scroll(page);
        self.watch_feed(page, feed);
        tracing::debug!(posts = self.posts.len(), "pagination active");
    }

    /// Capturing window scroll listener that always stops propagation,
    /// so the host's scroll-triggered loader never sees the event.
    /// Installed once per session and never removed.
    fn suppress_infinite_scroll(&mut self, page: &mut Page) {
        if self.scroll_guard.is_some() {
            return;
        }
        self.scroll_guard = Some(page.add_listener(
            EventTarget::Window,
            EventKind::Scroll,
            true,
            Box::new(|event| event.stop_propagation()),
        ));
    }

    /// Replace the feed observer. The old one is disconnected first so
    /// re-initialization never accumulates duplicates.
    fn watch_feed(&mut self, page: &mut Page, feed: NodeId) {
        if let Some(old) = self.feed_observer.take() {
            page.disconnect(old);
        }
        self.feed_observer = Some(page.observe(
            feed,
            ObserveOptions {
                child_list: true,
                subtree: true,
                ..Default::default()
            },
        ));
    }

    fn process_mutations(&mut self, page: &mut Page) {
        // Navigation watcher: poll the location on every mutation batch.
        if let Some(nav) = self.nav_observer {
            if !page.take_records(nav).is_empty() {
                self.check_navigation(page);
            }
        }

        // Feed watcher: debounce a refresh when matching posts arrive.
        if let Some(observer) = self.feed_observer {
            let records = page.take_records(observer);
            if self.state != WatcherState::Active {
                return;
            }
            let added_post = records.iter().flat_map(|r| r.added.iter()).any(|&node| {
                self.query
                    .as_ref()
                    .is_some_and(|q| q.is_post(page, node))
            });
            if added_post {
                self.schedule_refresh();
            }
        }
    }

    fn check_navigation(&mut self, page: &mut Page) {
        let href = page.location().href();
        if href == self.last_href {
            return;
        }
        self.last_href = href.to_string();
        self.page_index = 1;

        if page.location().matches_exactly(&self.config.feed_root) {
            if let Some(timer) = self.rearm_timer.take() {
                self.scheduler.cancel(timer);
            }
            self.rearm_timer = Some(
                self.scheduler
                    .schedule_once(WatcherTask::Rearm, self.config.rearm_delay_ms),
            );
            tracing::debug!("returned to feed root; discovery re-armed");
        } else {
            // Widgets and watchers stay attached but inert off-root.
            tracing::debug!(href = %self.last_href, "left feed root; page index reset");
        }
    }

    /// Debounce: a fresh batch of posts resets the pending delay.
    fn schedule_refresh(&mut self) {
        if let Some(timer) = self.refresh_timer.take() {
            self.scheduler.cancel(timer);
        }
        self.refresh_timer = Some(
            self.scheduler
                .schedule_once(WatcherTask::Refresh, self.config.refresh_debounce_ms),
        );
    }

    /// Re-derive the post collection and re-render the current page.
    fn refresh(&mut self, page: &mut Page) {
        self.refresh_timer = None;
        if self.state != WatcherState::Active {
            return;
        }
        let Some(query) = self.query.as_ref() else {
            return;
        };
        self.posts = query.locate_posts(page);
        self.clamp_page_index();
        self.render_current(page);
        tracing::debug!(
            posts = self.posts.len(),
            page = self.page_index,
            "feed refreshed"
        );
    }

    /// Keep the index inside the collection after re-derivation. A grown
    /// collection leaves it untouched; a shrunk one pulls it back.
    fn clamp_page_index(&mut self) {
        let total = self.config.total_pages(self.posts.len());
        self.page_index = self.page_index.clamp(1, total.max(1));
    }

    /// Realize the current page: visibility, controls, scroll position.
    fn render_current(&mut self, page: &mut Page) {
        let total = self.config.total_pages(self.posts.len());
        let start = (self.page_index - 1) * self.config.page_size;

        for &post in &self.posts {
            let _ = page.set_style_property(post, "display", "none");
            let _ = page.add_class(post, PAGINATED_CLASS);
        }
        for &post in self.posts.iter().skip(start).take(self.config.page_size) {
            let _ = page.set_style_property(post, "display", "block");
        }

        let _ = self.view.render(page, self.page_index, total);

        if let Some(feed) = self.feed {
            page.scroll_into_view(feed, ScrollBehavior::Smooth, ScrollAlign::Start);
        }
    }

    fn cancel_discovery_timers(&mut self) {
        if let Some(timer) = self.poll_timer.take() {
            self.scheduler.cancel(timer);
        }
        if let Some(timer) = self.timeout_timer.take() {
            self.scheduler.cancel(timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_dom::Document;

    fn feed_page(posts: usize) -> Page {
        let mut document = Document::new("https://www.instagram.com/");
        let body = document.body().unwrap();
        let tree = document.tree_mut();
        let main = tree.create_element_with("main", &[("role", "main")]);
        tree.append_child(body, main).unwrap();
        for _ in 0..posts {
            let post = tree.create_element_with("article", &[("role", "presentation")]);
            tree.append_child(main, post).unwrap();
        }
        Page::from_document(document).unwrap()
    }

    #[test]
    fn test_install_waits_for_document_ready() {
        let mut page = feed_page(5);
        page.set_ready_state(ReadyState::Loading);

        let mut paginator = Paginator::new(PaginatorConfig::default());
        paginator.install(&mut page);
        assert_eq!(paginator.state(), WatcherState::Idle);

        page.finish_load();
        paginator.document_ready();
        assert_eq!(paginator.state(), WatcherState::Discovering);
    }

    #[test]
    fn test_discovery_activates_on_first_successful_poll() {
        let mut page = feed_page(5);
        let mut paginator = Paginator::new(PaginatorConfig::default());
        paginator.install(&mut page);

        paginator.tick(&mut page, 999);
        assert_eq!(paginator.state(), WatcherState::Discovering);
        paginator.tick(&mut page, 1);
        assert_eq!(paginator.state(), WatcherState::Active);
        assert_eq!(paginator.post_count(), 5);
        assert_eq!(paginator.page_index(), 1);
    }

    #[test]
    fn test_clicks_ignored_before_activation() {
        let mut page = feed_page(5);
        let mut paginator = Paginator::new(PaginatorConfig::default());
        paginator.install(&mut page);

        let stray = page.tree_mut().create_element("button");
        paginator.handle_click(&mut page, stray);
        assert_eq!(paginator.page_index(), 1);
    }

    #[test]
    fn test_document_ready_before_install_is_inert() {
        let mut paginator = Paginator::new(PaginatorConfig::default());
        paginator.document_ready();
        assert_eq!(paginator.state(), WatcherState::Idle);
    }
}
