//! Failures reported through a session's result.

use crate::geometry::GeometryError;
use crate::layer::LayerError;
use crate::shapes::{ShapeId, ShapeKind, count_word};
use thiserror::Error;

/// Why a draw or edit did not produce a shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Another drawing or editing is in progress, end it first.")]
    Busy,

    #[error("{kind} needs at least {} vertexes, got {actual}", count_word(.required))]
    InsufficientPoints {
        kind: ShapeKind,
        required: usize,
        actual: usize,
    },

    #[error("No {kind} shape with id {id}")]
    NotFound { kind: ShapeKind, id: ShapeId },

    #[error("{kind} cannot be edited: {reason}")]
    Unsupported {
        kind: ShapeKind,
        reason: &'static str,
    },

    #[error("Drawing was interrupted")]
    Interrupted,

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Layer(#[from] LayerError),

    #[error("Session ended without a result")]
    Abandoned,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
