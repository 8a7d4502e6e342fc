//! Finished shapes as handed to the layer.

use crate::geo::GeoPoint;
use crate::geometry::{GeometryResult, Outline};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ShapeId, ShapeKind, ShapeParameters};

/// The persisted unit of a finished draw or edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub control_points: Vec<GeoPoint>,
    pub parameters: ShapeParameters,
    /// Derived from the control points; recomputed whenever they change.
    pub outline: Outline,
}

impl ShapeDescriptor {
    /// Compute the outline and assemble a descriptor.
    pub fn build(
        id: ShapeId,
        kind: ShapeKind,
        control_points: Vec<GeoPoint>,
        parameters: ShapeParameters,
    ) -> GeometryResult<Self> {
        let outline = (kind.spec().geometry)(&control_points, &parameters)?;
        Ok(Self {
            id,
            kind,
            control_points,
            parameters,
            outline,
        })
    }

    /// Build with a fresh id.
    pub fn create(
        kind: ShapeKind,
        control_points: Vec<GeoPoint>,
        parameters: ShapeParameters,
    ) -> GeometryResult<Self> {
        Self::build(Uuid::new_v4(), kind, control_points, parameters)
    }

    /// The single position of point-like symbols.
    pub fn position(&self) -> Option<GeoPoint> {
        if self.kind.is_single_point() {
            self.control_points.first().copied()
        } else {
            None
        }
    }
}
