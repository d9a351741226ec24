//! Page events.
//!
//! Listener registry with two-phase dispatch. The propagation path for a
//! node target runs window -> ancestors -> target in the capture phase,
//! then back up in the bubble phase; on a single target the capture-phase
//! listeners still run first. Stopping propagation suppresses every later
//! delivery, which is what scroll interception relies on.

use fp_dom::NodeId;

/// Event kinds a page dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Scroll,
    Click,
}

/// What an event is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Node(NodeId),
}

/// A dispatched event.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub target: EventTarget,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: EventTarget) -> Self {
        Self {
            kind,
            target,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Stop the event from reaching any later listener.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Mark the default action as cancelled.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Listener identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Boxed listener callback. Handlers only see the event itself; they
/// cannot reach back into the page mid-dispatch.
pub type EventHandler = Box<dyn FnMut(&mut Event)>;

struct Listener {
    id: ListenerId,
    target: EventTarget,
    kind: EventKind,
    capture: bool,
    handler: EventHandler,
}

/// Registered event listeners for one page.
#[derive(Default)]
pub(crate) struct EventListeners {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl EventListeners {
    pub(crate) fn add(
        &mut self,
        target: EventTarget,
        kind: EventKind,
        capture: bool,
        handler: EventHandler,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener {
            id,
            target,
            kind,
            capture,
            handler,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Deliver an event along its propagation path.
    ///
    /// `path` is ordered window-first and must end at the target.
    pub(crate) fn dispatch(&mut self, event: &mut Event, path: &[EventTarget]) {
        // Capture phase: window down to target.
        for hop in path {
            self.deliver(event, *hop, true);
            if event.propagation_stopped() {
                return;
            }
        }
        // Bubble phase: target back up to window.
        for hop in path.iter().rev() {
            self.deliver(event, *hop, false);
            if event.propagation_stopped() {
                return;
            }
        }
    }

    fn deliver(&mut self, event: &mut Event, hop: EventTarget, capture: bool) {
        for listener in &mut self.listeners {
            if listener.target == hop && listener.kind == event.kind && listener.capture == capture
            {
                (listener.handler)(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_capture_runs_before_bubble() {
        let mut listeners = EventListeners::default();
        let order = Rc::new(Cell::new(Vec::new()));

        let log = order.clone();
        listeners.add(
            EventTarget::Window,
            EventKind::Scroll,
            false,
            Box::new(move |_| {
                let mut v = log.take();
                v.push("bubble");
                log.set(v);
            }),
        );
        let log = order.clone();
        listeners.add(
            EventTarget::Window,
            EventKind::Scroll,
            true,
            Box::new(move |_| {
                let mut v = log.take();
                v.push("capture");
                log.set(v);
            }),
        );

        let mut event = Event::new(EventKind::Scroll, EventTarget::Window);
        listeners.dispatch(&mut event, &[EventTarget::Window]);
        assert_eq!(order.take(), vec!["capture", "bubble"]);
    }

    #[test]
    fn test_stop_propagation_suppresses_bubble() {
        let mut listeners = EventListeners::default();
        let fired = Rc::new(Cell::new(0));

        listeners.add(
            EventTarget::Window,
            EventKind::Scroll,
            true,
            Box::new(|event| event.stop_propagation()),
        );
        let count = fired.clone();
        listeners.add(
            EventTarget::Window,
            EventKind::Scroll,
            false,
            Box::new(move |_| count.set(count.get() + 1)),
        );

        let mut event = Event::new(EventKind::Scroll, EventTarget::Window);
        listeners.dispatch(&mut event, &[EventTarget::Window]);
        assert_eq!(fired.get(), 0);
        assert!(event.propagation_stopped());
    }

    #[test]
    fn test_removed_listener_no_longer_fires() {
        let mut listeners = EventListeners::default();
        let fired = Rc::new(Cell::new(0));

        let count = fired.clone();
        let id = listeners.add(
            EventTarget::Window,
            EventKind::Click,
            false,
            Box::new(move |_| count.set(count.get() + 1)),
        );

        let mut event = Event::new(EventKind::Click, EventTarget::Window);
        listeners.dispatch(&mut event, &[EventTarget::Window]);
        assert!(listeners.remove(id));
        let mut event = Event::new(EventKind::Click, EventTarget::Window);
        listeners.dispatch(&mut event, &[EventTarget::Window]);

        assert_eq!(fired.get(), 1);
        assert!(!listeners.remove(id));
    }
}
