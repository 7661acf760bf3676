//! Document error types

/// Errors raised by structural document operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The node id does not belong to this document.
    #[error("unknown node {0}")]
    UnknownNode(crate::NodeId),

    /// The node was removed from the document.
    #[error("node {0} has been removed")]
    Removed(crate::NodeId),

    /// The node has no parent, so it cannot get a sibling.
    #[error("node {0} is not attached to a parent")]
    Detached(crate::NodeId),

    /// Another live node already uses this element id.
    #[error("element id '{0}' is already in use")]
    DuplicateId(String),

    /// The operation would break the tree (cycle, or moving the root).
    #[error("invalid hierarchy: {0}")]
    Hierarchy(String),
}
