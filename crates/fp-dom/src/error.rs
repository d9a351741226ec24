//! DOM operation errors.

/// Result type for DOM operations.
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors.
///
/// Query misses are not errors; lookups return `Option` or an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// A node ID does not refer to a node in this tree.
    #[error("node not found")]
    NotFound,
    /// The operation would create a cycle (e.g. inserting an ancestor).
    #[error("hierarchy request error")]
    HierarchyRequest,
    /// The node is not a child of the given parent.
    #[error("node is not a child of the given parent")]
    NotAChild,
    /// The target node cannot contain children.
    #[error("node cannot contain children")]
    InvalidNodeType,
}
