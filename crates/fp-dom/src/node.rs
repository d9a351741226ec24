//! DOM nodes.
//!
//! A `Node` holds its tree links plus kind-specific data. Element data
//! caches the `id` attribute and the class list, since those are the
//! hottest lookups for selector matching.

use crate::NodeId;

/// DOM node: tree links + data.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (`None` if detached or root).
    pub parent: Option<NodeId>,
    /// First child.
    pub first_child: Option<NodeId>,
    /// Last child (for O(1) append).
    pub last_child: Option<NodeId>,
    /// Previous sibling.
    pub prev_sibling: Option<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
    /// Node-specific data.
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            data,
        }
    }

    /// Check if this is an element.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is a text node.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element.
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data.
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element.
    Element(ElementData),
    /// Text content.
    Text(String),
    /// Comment.
    Comment(String),
}

/// Attribute name/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Element-specific data.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Tag name, lowercased.
    pub tag: String,
    attrs: Vec<Attribute>,
    id: Option<String>,
    classes: Vec<String>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            id: None,
            classes: Vec::new(),
        }
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check if an attribute exists.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute, keeping the id/class caches in sync.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attrs.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
        self.refresh_cache(name);
    }

    /// Remove an attribute. Returns whether it existed.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|a| a.name != name);
        let removed = self.attrs.len() != before;
        if removed {
            self.refresh_cache(name);
        }
        removed
    }

    /// Iterate over attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    /// Cached `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Cached class list.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Check class membership.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut value = self.attr("class").unwrap_or("").to_string();
        if !value.is_empty() {
            value.push(' ');
        }
        value.push_str(class);
        self.set_attr("class", &value);
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let value = self
            .classes
            .iter()
            .filter(|c| c.as_str() != class)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("class", &value);
    }

    /// Read one property from the inline `style` attribute.
    pub fn style_property(&self, property: &str) -> Option<String> {
        parse_declarations(self.attr("style")?)
            .into_iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    /// Write one property into the inline `style` attribute, preserving
    /// unrelated declarations.
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        let mut decls = parse_declarations(self.attr("style").unwrap_or(""));
        match decls.iter_mut().find(|(name, _)| name == property) {
            Some(decl) => decl.1 = value.to_string(),
            None => decls.push((property.to_string(), value.to_string())),
        }
        let style = decls
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attr("style", &style);
    }

    fn refresh_cache(&mut self, name: &str) {
        if name == "id" {
            self.id = self.attr("id").map(str::to_string);
        } else if name == "class" {
            self.classes = self
                .attr("class")
                .unwrap_or("")
                .split_whitespace()
                .map(str::to_string)
                .collect();
        }
    }
}

/// Split an inline style string into (property, value) declarations.
fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_attribute() {
        let mut elem = ElementData::new("DIV");
        elem.set_attr("role", "main");

        assert_eq!(elem.tag, "div");
        assert_eq!(elem.attr("role"), Some("main"));
        assert!(elem.has_attr("role"));
        assert!(!elem.has_attr("id"));
    }

    #[test]
    fn test_id_and_class_caches() {
        let mut elem = ElementData::new("div");
        elem.set_attr("id", "feed");
        elem.set_attr("class", "wrapper active");

        assert_eq!(elem.id(), Some("feed"));
        assert!(elem.has_class("wrapper"));
        assert!(elem.has_class("active"));

        elem.remove_attr("id");
        assert_eq!(elem.id(), None);
    }

    #[test]
    fn test_add_remove_class() {
        let mut elem = ElementData::new("article");
        elem.add_class("paginated-post");
        elem.add_class("paginated-post");

        assert_eq!(elem.attr("class"), Some("paginated-post"));

        elem.add_class("hidden");
        elem.remove_class("paginated-post");
        assert_eq!(elem.attr("class"), Some("hidden"));
    }

    #[test]
    fn test_style_property_preserves_other_declarations() {
        let mut elem = ElementData::new("article");
        elem.set_attr("style", "margin: 0; display: block");

        elem.set_style_property("display", "none");
        assert_eq!(elem.style_property("display"), Some("none".to_string()));
        assert_eq!(elem.style_property("margin"), Some("0".to_string()));

        elem.set_style_property("color", "red");
        assert_eq!(elem.style_property("color"), Some("red".to_string()));
        assert_eq!(elem.style_property("display"), Some("none".to_string()));
    }
}
