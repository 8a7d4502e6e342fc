//! In-memory layer implementation.

use super::{Layer, LayerError, LayerResult};
use crate::shapes::{ShapeDescriptor, ShapeId};
use std::collections::HashMap;

/// In-memory layer for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryLayer {
    shapes: HashMap<ShapeId, ShapeDescriptor>,
    /// Insertion order, so listings are stable.
    order: Vec<ShapeId>,
}

impl MemoryLayer {
    /// Create a new empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate shapes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ShapeDescriptor> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }
}

impl Layer for MemoryLayer {
    fn save(&mut self, id: ShapeId, descriptor: ShapeDescriptor) -> LayerResult<()> {
        if descriptor.id != id {
            return Err(LayerError::Other(format!(
                "descriptor id {} does not match key {}",
                descriptor.id, id
            )));
        }
        if self.shapes.insert(id, descriptor).is_none() {
            self.order.push(id);
        }
        Ok(())
    }

    fn get(&self, id: ShapeId) -> Option<&ShapeDescriptor> {
        self.shapes.get(&id)
    }

    fn remove(&mut self, id: ShapeId) -> LayerResult<ShapeDescriptor> {
        let removed = self.shapes.remove(&id).ok_or(LayerError::NotFound(id))?;
        self.order.retain(|&other| other != id);
        Ok(removed)
    }

    fn list(&self) -> Vec<ShapeId> {
        self.order.clone()
    }

    fn clear(&mut self) {
        self.shapes.clear();
        self.order.clear();
    }
}
