//! fp paginator.
//!
//! Replaces an infinite-scroll feed with discrete pages: locates the
//! host page's posts, slices them into fixed-size pages, injects
//! previous/next controls at both ends of the feed, and suppresses the
//! host's own scroll-triggered loading. Everything degrades to inaction
//! when the page does not look like a feed.

mod config;
mod locate;
mod paginator;
mod view;

pub use config::PaginatorConfig;
pub use paginator::{Paginator, WatcherState};
pub use view::{BOTTOM_WIDGET_ID, PAGINATED_CLASS, TOP_WIDGET_ID};
