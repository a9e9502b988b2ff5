//! Error types for the host mesh boundary and the tool lifecycle.

use thiserror::Error;

use crate::mesh::{EdgeId, FaceId, VertId};

/// Result alias for host mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors reported by the host mesh when an edit request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("vertex {0} does not exist")]
    DeadVertex(VertId),

    #[error("edge {0} does not exist")]
    DeadEdge(EdgeId),

    #[error("face {0} does not exist")]
    DeadFace(FaceId),

    #[error("face needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("vertex {0} appears more than once in the face loop")]
    RepeatedVertex(VertId),

    #[error("a face over the same vertices already exists ({0})")]
    DuplicateFace(FaceId),

    #[error("face {face} references vertex index {index}, mesh has {count} vertices")]
    InvalidVertexIndex { face: usize, index: u32, count: usize },
}

/// Precondition failures: the tool refuses to start or to act.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("no mesh is being edited")]
    NotEditing,

    #[error("no faces are selected")]
    EmptySelection,

    #[error("the tool is not active")]
    NotActive,

    #[error("the tool is already active")]
    AlreadyActive,

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("host mesh rejected the request: {0}")]
    Host(#[from] MeshError),
}
