//! Mutation observation.
//!
//! Observers register interest in a target node (optionally its whole
//! subtree) and accumulate records until drained with `take_records`.
//! Records are generated by the `Page` mutation wrappers; direct tree
//! edits bypass observation.

use fp_dom::{DomTree, NodeId};

/// Mutation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    ChildList,
    Attributes,
}

/// One observed mutation.
#[derive(Debug, Clone)]
pub struct MutationRecord {
    pub kind: MutationKind,
    /// The parent whose child list changed, or the element whose
    /// attribute changed.
    pub target: NodeId,
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
    pub attribute: Option<String>,
}

impl MutationRecord {
    pub(crate) fn child_list(target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) -> Self {
        Self {
            kind: MutationKind::ChildList,
            target,
            added,
            removed,
            attribute: None,
        }
    }

    pub(crate) fn attribute(target: NodeId, name: &str) -> Self {
        Self {
            kind: MutationKind::Attributes,
            target,
            added: Vec::new(),
            removed: Vec::new(),
            attribute: Some(name.to_string()),
        }
    }
}

/// What an observer is interested in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObserveOptions {
    pub child_list: bool,
    pub attributes: bool,
    /// Match mutations anywhere under the target, not just on it.
    pub subtree: bool,
}

/// Observer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Debug)]
struct Observation {
    id: ObserverId,
    target: NodeId,
    options: ObserveOptions,
    pending: Vec<MutationRecord>,
}

/// All mutation observers attached to one page.
#[derive(Debug, Default)]
pub(crate) struct MutationObservers {
    next_id: u64,
    observations: Vec<Observation>,
}

impl MutationObservers {
    pub(crate) fn observe(&mut self, target: NodeId, options: ObserveOptions) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observations.push(Observation {
            id,
            target,
            options,
            pending: Vec::new(),
        });
        id
    }

    pub(crate) fn disconnect(&mut self, id: ObserverId) -> bool {
        let before = self.observations.len();
        self.observations.retain(|o| o.id != id);
        self.observations.len() != before
    }

    pub(crate) fn take_records(&mut self, id: ObserverId) -> Vec<MutationRecord> {
        self.observations
            .iter_mut()
            .find(|o| o.id == id)
            .map(|o| std::mem::take(&mut o.pending))
            .unwrap_or_default()
    }

    pub(crate) fn has_pending(&self, id: ObserverId) -> bool {
        self.observations
            .iter()
            .any(|o| o.id == id && !o.pending.is_empty())
    }

    /// Route a record to every observation it matches.
    pub(crate) fn notify(&mut self, tree: &DomTree, record: MutationRecord) {
        for obs in &mut self.observations {
            let wants_kind = match record.kind {
                MutationKind::ChildList => obs.options.child_list,
                MutationKind::Attributes => obs.options.attributes,
            };
            if !wants_kind {
                continue;
            }
            let in_scope = obs.target == record.target
                || (obs.options.subtree && tree.is_ancestor(obs.target, record.target));
            if in_scope {
                obs.pending.push(record.clone());
            }
        }
    }
}
