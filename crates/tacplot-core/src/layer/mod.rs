//! Storage seam for finished shapes.
//!
//! The host owns persistence and display of finished symbols; the engine
//! only needs a key-value cache keyed by shape id.

mod memory;

pub use memory::MemoryLayer;

use crate::shapes::{ShapeDescriptor, ShapeId};
use thiserror::Error;

/// Layer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerError {
    #[error("Shape not found: {0}")]
    NotFound(ShapeId),
    #[error("Layer error: {0}")]
    Other(String),
}

/// Result type for layer operations.
pub type LayerResult<T> = Result<T, LayerError>;

/// Trait for shape layers.
pub trait Layer {
    /// Insert or replace a shape.
    fn save(&mut self, id: ShapeId, descriptor: ShapeDescriptor) -> LayerResult<()>;

    /// Look up a shape.
    fn get(&self, id: ShapeId) -> Option<&ShapeDescriptor>;

    /// Remove a shape, returning it.
    fn remove(&mut self, id: ShapeId) -> LayerResult<ShapeDescriptor>;

    /// All stored shape ids.
    fn list(&self) -> Vec<ShapeId>;

    /// Remove every shape.
    fn clear(&mut self) {
        for id in self.list() {
            let _ = self.remove(id);
        }
    }

    /// Check if a shape exists.
    fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }
}
