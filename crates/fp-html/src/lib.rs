//! fp HTML parser.
//!
//! Builds `fp-dom` documents from HTML text using html5ever's RcDom and
//! converting the result into the arena tree.

mod parser;

pub use parser::HtmlParser;

/// Parse an HTML string into a document.
pub fn parse(html: &str) -> fp_dom::Document {
    HtmlParser::new().parse(html)
}

/// Parse an HTML string into a document with the given URL.
pub fn parse_with_url(html: &str, url: &str) -> fp_dom::Document {
    HtmlParser::new().parse_with_url(html, url)
}
