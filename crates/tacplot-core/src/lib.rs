//! Interactive authoring of map symbology.
//!
//! Operators place anchors with the pointer; the geometry kernel turns them
//! into outlines (tapered arrows included); finished shapes go to the host's
//! layer. Sessions for every shape kind share one gate, so only one draw or
//! edit runs at a time.

pub mod authoring;
pub mod camera;
pub mod config;
pub mod error;
pub mod events;
pub mod geo;
pub mod geometry;
pub mod input;
pub mod layer;
pub mod session;
pub mod shapes;
pub mod tools;
pub mod viewport;

pub use authoring::Authoring;
pub use camera::Camera;
pub use config::AuthoringConfig;
pub use error::{SessionError, SessionResult};
pub use events::{EventBus, EventData, EventHandler, EventKind, InteractionEvent, SubscriptionId};
pub use geo::GeoPoint;
pub use geometry::{GeometryError, Outline};
pub use input::{InputState, MouseButton, PointerEvent};
pub use layer::{Layer, LayerError, MemoryLayer};
pub use session::{DrawOptions, Pending, SceneContext, SessionGate, SessionHolder, SessionMode};
pub use shapes::{ShapeDescriptor, ShapeId, ShapeKind, ShapeParameters};
pub use tools::ShapeTool;
pub use viewport::{OffscreenViewport, Primitive, PrimitiveId, Viewport};

#[cfg(test)]
mod scenarios;
