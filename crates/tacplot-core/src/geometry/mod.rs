//! Geometry kernel: control points in, boundary outline out.
//!
//! Every function here is pure. Degenerate input (duplicate or collinear
//! anchors) is not rejected; it yields a degenerate outline instead of an
//! error or a panic.

pub mod arrow;
pub mod basic;
pub mod math;
pub mod pincer;

use crate::geo::GeoPoint;
use crate::shapes::{ShapeKind, ShapeParameters, count_word};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geometry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("{kind} needs at least {} vertexes, got {actual}", count_word(.required))]
    TooFewPoints {
        kind: ShapeKind,
        required: usize,
        actual: usize,
    },
}

/// Result type for outline computations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// A derived boundary: a ring for filled shapes, a path for lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Outline {
    pub positions: Vec<GeoPoint>,
    /// Closed outlines repeat their first position at the end.
    pub closed: bool,
}

impl Outline {
    pub fn open(positions: Vec<GeoPoint>) -> Self {
        Self {
            positions,
            closed: false,
        }
    }

    /// Close the ring by repeating the first position.
    pub fn ring(mut positions: Vec<GeoPoint>) -> Self {
        if let Some(first) = positions.first().copied() {
            positions.push(first);
        }
        Self {
            positions,
            closed: true,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Compute the outline of `kind` from its control points.
pub fn compute(
    kind: ShapeKind,
    points: &[GeoPoint],
    parameters: &ShapeParameters,
) -> GeometryResult<Outline> {
    (kind.spec().geometry)(points, parameters)
}

pub(crate) fn require(kind: ShapeKind, points: &[GeoPoint], required: usize) -> GeometryResult<()> {
    if points.len() < required {
        return Err(GeometryError::TooFewPoints {
            kind,
            required,
            actual: points.len(),
        });
    }
    Ok(())
}

/// Height given to positions the kernel derives.
pub(crate) fn base_height(points: &[GeoPoint]) -> f64 {
    points.first().map(|p| p.height).unwrap_or(0.0)
}

pub(crate) fn lift(points: &[kurbo::Point], height: f64) -> Vec<GeoPoint> {
    points.iter().map(|p| GeoPoint::from_planar(*p, height)).collect()
}
