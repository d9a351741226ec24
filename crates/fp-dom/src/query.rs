//! Element queries.
//!
//! Simple selectors: a tag name, `#id`, `.class`, or `*`, optionally
//! qualified by one `[attr="value"]` test (`main[role="main"]`). That is
//! the whole grammar the host-page markers need; there are no combinators.

use crate::{ElementData, DomTree, Node, NodeId};

/// A parsed simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    part: Part,
    attr: Option<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
}

impl Selector {
    /// Parse a selector string. Returns `None` for anything outside the
    /// supported grammar.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let (base, attr) = match input.split_once('[') {
            Some((base, rest)) => {
                let qualifier = rest.strip_suffix(']')?;
                let (name, value) = qualifier.split_once('=')?;
                let value = value.trim().trim_matches('"').trim_matches('\'');
                (base.trim(), Some((name.trim().to_string(), value.to_string())))
            }
            None => (input, None),
        };

        let part = if base.is_empty() || base == "*" {
            Part::Universal
        } else if let Some(id) = base.strip_prefix('#') {
            Part::Id(id.to_string())
        } else if let Some(class) = base.strip_prefix('.') {
            Part::Class(class.to_string())
        } else {
            if !base.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return None;
            }
            Part::Tag(base.to_ascii_lowercase())
        };

        Some(Self { part, attr })
    }

    /// Check whether an element matches this selector.
    pub fn matches(&self, elem: &ElementData) -> bool {
        let base = match &self.part {
            Part::Universal => true,
            Part::Tag(tag) => elem.tag == *tag,
            Part::Id(id) => elem.id() == Some(id.as_str()),
            Part::Class(class) => elem.has_class(class),
        };
        base && match &self.attr {
            Some((name, value)) => elem.attr(name) == Some(value.as_str()),
            None => true,
        }
    }
}

impl DomTree {
    /// First descendant of `root` matching `selector`, in document order.
    pub fn query_selector(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(root).find(|&id| {
            self.get(id)
                .and_then(Node::as_element)
                .is_some_and(|e| selector.matches(e))
        })
    }

    /// All descendants of `root` matching `selector`, in document order.
    pub fn query_selector_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&id| {
                self.get(id)
                    .and_then(Node::as_element)
                    .is_some_and(|e| selector.matches(e))
            })
            .collect()
    }

    /// Check whether a node is an element matching `selector`.
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.get(id)
            .and_then(Node::as_element)
            .is_some_and(|e| selector.matches(e))
    }
}
