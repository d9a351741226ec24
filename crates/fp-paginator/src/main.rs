//! Feed paginator demo.
//!
//! Loads an HTML feed page from disk, installs the paginator, and
//! simulates a short session: discovery, then a walk forward through
//! every page, logging what each page shows.

use anyhow::{Context, Result};
use fp_dom::{NodeId, Selector};
use fp_page::Page;
use fp_paginator::{Paginator, PaginatorConfig, TOP_WIDGET_ID};
use std::path::PathBuf;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .context("usage: fp-paginator <feed.html>")?
        .into();
    let html = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;

    let config = PaginatorConfig::default();
    let document = fp_html::parse_with_url(&html, &config.feed_root);
    let mut page = Page::from_document(document).context("invalid page URL")?;

    let mut paginator = Paginator::new(config.clone());
    paginator.install(&mut page);

    // Give discovery one poll interval to find the feed.
    paginator.tick(&mut page, config.poll_interval_ms);
    if paginator.post_count() == 0 {
        tracing::info!("no feed posts found; nothing to paginate");
        return Ok(());
    }
    tracing::info!(posts = paginator.post_count(), "pagination installed");
    log_current_page(&page, &config);

    // Walk forward until "next" stops advancing.
    let next = widget_button(&page, ".next-btn")?;
    loop {
        let before = paginator.page_index();
        paginator.handle_click(&mut page, next);
        if paginator.page_index() == before {
            break;
        }
        log_current_page(&page, &config);
    }

    Ok(())
}

/// A control inside the top widget.
fn widget_button(page: &Page, selector: &str) -> Result<NodeId> {
    let widget = page
        .document()
        .get_element_by_id(TOP_WIDGET_ID)
        .context("pagination widget missing")?;
    let selector = Selector::parse(selector).context("bad control selector")?;
    page.tree()
        .query_selector(widget, &selector)
        .context("pagination control missing")
}

fn log_current_page(page: &Page, config: &PaginatorConfig) {
    let label = page
        .document()
        .get_element_by_id(TOP_WIDGET_ID)
        .and_then(|widget| {
            let selector = Selector::parse(".page-label")?;
            let label = page.tree().query_selector(widget, &selector)?;
            Some(page.tree().text_content(label))
        })
        .unwrap_or_default();

    let visible = Selector::parse(&config.post_selector)
        .map(|selector| {
            page.tree()
                .query_selector_all(page.tree().root(), &selector)
                .into_iter()
                .filter(|&post| {
                    page.tree()
                        .element(post)
                        .and_then(|e| e.style_property("display"))
                        .as_deref()
                        == Some("block")
                })
                .count()
        })
        .unwrap_or(0);

    tracing::info!(page = label, visible, "rendered");
}
