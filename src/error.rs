//! Error types for canvas operations.

use crate::canvas::{ElementId, ElementKind};
use crate::edge_pool::EdgeId;
use thiserror::Error;

/// Errors returned by operations addressed through an explicit handle.
///
/// Interaction policy outcomes (a self-click cancelling a line, a drag below
/// the threshold) are never reported through this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// The element handle is stale or was never issued by this canvas.
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),

    /// The element exists but has the wrong kind for the operation.
    #[error("element {id:?} is a {found:?}, expected {expected}")]
    WrongKind {
        id: ElementId,
        expected: &'static str,
        found: ElementKind,
    },

    /// The edge handle is stale or was never issued by this pool.
    #[error("unknown edge {0:?}")]
    UnknownEdge(EdgeId),

    /// Every slot of the edge pool is in use.
    #[error("edge pool exhausted (capacity {capacity})")]
    PoolExhausted { capacity: usize },
}
