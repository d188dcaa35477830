//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::NodeId;

/// Structural violations raised by the node model.
///
/// Every mutation checks these before touching the arena, so a returned
/// error means the tree is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("cyclic reference: {node:?} cannot be attached under {parent:?}")]
    CyclicReference { node: NodeId, parent: NodeId },

    #[error("cannot build path between disjoint nodes {from:?} and {to:?}")]
    DisjointNodes { from: NodeId, to: NodeId },

    #[error("parent / child inconsistency at node {0:?}")]
    TreeIntegrity(NodeId),

    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
}

/// Result type for node model operations.
pub type TreeResult<T> = Result<T, TreeError>;
