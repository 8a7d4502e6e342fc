//! Draw and edit session state machines.
//!
//! A session owns everything it puts into the scene (preview outline, vertex
//! markers, the disabled-navigation state) and gives all of it back on every
//! exit path, together with the [`SessionToken`] it holds.

pub mod draw;
pub mod edit;
pub mod gate;
pub mod pending;

pub use draw::DrawOptions;
pub use gate::{SessionGate, SessionHolder, SessionMode, SessionToken};
pub use pending::{Completer, Pending};

use crate::layer::Layer;
use crate::viewport::{Primitive, PrimitiveId, Viewport};

/// Collaborators a session works against during one call.
pub struct SceneContext<'a> {
    pub viewport: &'a mut dyn Viewport,
    pub layer: &'a mut dyn Layer,
}

impl<'a> SceneContext<'a> {
    pub fn new(viewport: &'a mut dyn Viewport, layer: &'a mut dyn Layer) -> Self {
        Self { viewport, layer }
    }
}

/// What a session wants after handling one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Continue,
    Finish,
}

/// Add `primitive` to the scene, or replace the one already in `slot`.
pub(crate) fn show(viewport: &mut dyn Viewport, slot: &mut Option<PrimitiveId>, primitive: Primitive) {
    match *slot {
        Some(id) => viewport.update_primitive(id, primitive),
        None => *slot = Some(viewport.add_primitive(primitive)),
    }
}

/// Remove the primitive in `slot`, if any.
pub(crate) fn hide(viewport: &mut dyn Viewport, slot: &mut Option<PrimitiveId>) {
    if let Some(id) = slot.take() {
        viewport.remove_primitive(id);
    }
}
