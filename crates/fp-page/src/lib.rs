//! fp page runtime.
//!
//! The surface a page-intervention feature runs against: a `Page` owning
//! the document, its location, an event listener registry with
//! capture/bubble dispatch, mutation observation, and scroll requests.
//! Timekeeping is virtual: features own a `Scheduler` and the embedder
//! advances it explicitly, so tests never sleep.

mod events;
mod location;
mod mutation;
mod page;
mod scheduler;

pub use events::{Event, EventHandler, EventKind, EventTarget, ListenerId};
pub use location::Location;
pub use mutation::{MutationKind, MutationRecord, ObserveOptions, ObserverId};
pub use page::{Page, ReadyState, ScrollAlign, ScrollBehavior, ScrollRequest};
pub use scheduler::{Scheduler, TimerId};
