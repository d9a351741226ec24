//! The loaded page.
//!
//! `Page` owns the document and the runtime surfaces around it. DOM
//! mutations done through the page generate mutation records; events are
//! dispatched along the document's propagation path; scroll requests are
//! recorded for the embedder, since there is no layout to perform them.

use fp_dom::{Document, DomResult, DomError, DomTree, NodeId};

use crate::events::{Event, EventHandler, EventKind, EventListeners, EventTarget, ListenerId};
use crate::location::Location;
use crate::mutation::{MutationObservers, MutationRecord, ObserveOptions, ObserverId};

/// Document readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Complete,
}

/// Scroll animation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// Where the scrolled-to element should land in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Start,
    Center,
    End,
}

/// A recorded scroll-into-view request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: NodeId,
    pub behavior: ScrollBehavior,
    pub align: ScrollAlign,
}

/// A loaded web page.
pub struct Page {
    document: Document,
    location: Location,
    ready_state: ReadyState,
    listeners: EventListeners,
    observers: MutationObservers,
    scroll_request: Option<ScrollRequest>,
}

impl Page {
    /// Wrap a document, taking the location from its URL.
    pub fn from_document(document: Document) -> Result<Self, url::ParseError> {
        let location = Location::parse(document.url())?;
        Ok(Self {
            document,
            location,
            ready_state: ReadyState::Complete,
            listeners: EventListeners::default(),
            observers: MutationObservers::default(),
            scroll_request: None,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn tree(&self) -> &DomTree {
        self.document.tree()
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        self.document.tree_mut()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Replace the location, as an in-page navigation would.
    ///
    /// Only the location changes; the host page is expected to mutate the
    /// document afterwards, which is what wakes navigation watchers.
    pub fn navigate(&mut self, href: &str) -> Result<(), url::ParseError> {
        self.location.set_href(href)?;
        tracing::debug!(href, "page navigated");
        Ok(())
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
    }

    /// Mark the document load as finished.
    pub fn finish_load(&mut self) {
        self.ready_state = ReadyState::Complete;
    }

    // ---- Observed DOM mutations ------------------------------------

    /// Append `child` to `parent` and record the mutation.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.document.tree_mut().append_child(parent, child)?;
        self.notify(MutationRecord::child_list(parent, vec![child], vec![]));
        Ok(())
    }

    /// Insert `child` before `reference` and record the mutation.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        self.document
            .tree_mut()
            .insert_before(parent, child, reference)?;
        self.notify(MutationRecord::child_list(parent, vec![child], vec![]));
        Ok(())
    }

    /// Remove `child` from `parent` and record the mutation.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.document.tree_mut().remove_child(parent, child)?;
        self.notify(MutationRecord::child_list(parent, vec![], vec![child]));
        Ok(())
    }

    /// Set an attribute and record the mutation.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.document
            .tree_mut()
            .element_mut(node)
            .ok_or(DomError::NotFound)?
            .set_attr(name, value);
        self.notify(MutationRecord::attribute(node, name));
        Ok(())
    }

    /// Remove an attribute and record the mutation if it existed.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<()> {
        let removed = self
            .document
            .tree_mut()
            .element_mut(node)
            .ok_or(DomError::NotFound)?
            .remove_attr(name);
        if removed {
            self.notify(MutationRecord::attribute(node, name));
        }
        Ok(())
    }

    /// Write one inline style property and record the mutation.
    pub fn set_style_property(&mut self, node: NodeId, property: &str, value: &str) -> DomResult<()> {
        self.document
            .tree_mut()
            .element_mut(node)
            .ok_or(DomError::NotFound)?
            .set_style_property(property, value);
        self.notify(MutationRecord::attribute(node, "style"));
        Ok(())
    }

    /// Add a class and record the mutation.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> DomResult<()> {
        self.document
            .tree_mut()
            .element_mut(node)
            .ok_or(DomError::NotFound)?
            .add_class(class);
        self.notify(MutationRecord::attribute(node, "class"));
        Ok(())
    }

    /// Replace the children of `node` with a single text node.
    pub fn set_text(&mut self, node: NodeId, content: &str) -> DomResult<()> {
        let old: Vec<NodeId> = self.document.tree().children(node).collect();
        for child in &old {
            self.document.tree_mut().remove_child(node, *child)?;
        }
        let text = self.document.tree_mut().create_text(content);
        self.document.tree_mut().append_child(node, text)?;
        self.notify(MutationRecord::child_list(node, vec![text], old));
        Ok(())
    }

    fn notify(&mut self, record: MutationRecord) {
        self.observers.notify(self.document.tree(), record);
    }

    // ---- Mutation observers ----------------------------------------

    pub fn observe(&mut self, target: NodeId, options: ObserveOptions) -> ObserverId {
        self.observers.observe(target, options)
    }

    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        self.observers.disconnect(id)
    }

    pub fn take_records(&mut self, id: ObserverId) -> Vec<MutationRecord> {
        self.observers.take_records(id)
    }

    pub fn has_pending_records(&self, id: ObserverId) -> bool {
        self.observers.has_pending(id)
    }

    // ---- Events ----------------------------------------------------

    pub fn add_listener(
        &mut self,
        target: EventTarget,
        kind: EventKind,
        capture: bool,
        handler: EventHandler,
    ) -> ListenerId {
        self.listeners.add(target, kind, capture, handler)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Dispatch an event along the target's propagation path.
    pub fn dispatch(&mut self, kind: EventKind, target: EventTarget) -> Event {
        let mut event = Event::new(kind, target);
        let path = self.propagation_path(target);
        self.listeners.dispatch(&mut event, &path);
        event
    }

    /// Dispatch a window scroll event.
    pub fn dispatch_scroll(&mut self) -> Event {
        self.dispatch(EventKind::Scroll, EventTarget::Window)
    }

    fn propagation_path(&self, target: EventTarget) -> Vec<EventTarget> {
        let mut path = vec![EventTarget::Window];
        if let EventTarget::Node(id) = target {
            let depth = path.len();
            for ancestor in self.document.tree().ancestors(id) {
                path.insert(depth, EventTarget::Node(ancestor));
            }
            path.push(EventTarget::Node(id));
        }
        path
    }

    // ---- Viewport --------------------------------------------------

    /// Record a scroll-into-view request for the embedder.
    pub fn scroll_into_view(&mut self, target: NodeId, behavior: ScrollBehavior, align: ScrollAlign) {
        self.scroll_request = Some(ScrollRequest {
            target,
            behavior,
            align,
        });
    }

    /// Take the most recent scroll request, if any.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.scroll_request.take()
    }
}
