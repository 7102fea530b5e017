//! DOM operation errors

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node id is not in this tree
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Operation not valid for this node type
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Reference node is not a child of the parent
    #[error("Node is not a child")]
    NotAChild,
}
