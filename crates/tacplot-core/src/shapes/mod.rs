//! Shape kinds, parameters and descriptors.

mod descriptor;
mod kind;
mod params;

pub use descriptor::ShapeDescriptor;
pub use kind::{EditSupport, FinishTrigger, GeometryFn, ShapeKind, ShapeSpec};
pub(crate) use kind::count_word;
pub use params::{
    AttackArrowParams, CircleParams, LabelParams, PincerArrowParams, ShapeParameters,
    StraightArrowParams, WallParams,
};

use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;
