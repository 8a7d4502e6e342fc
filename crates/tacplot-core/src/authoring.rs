//! Facade owning the scene collaborators and one tool per shape kind.

use std::collections::HashMap;

use crate::config::AuthoringConfig;
use crate::error::SessionResult;
use crate::events::{EventHandler, EventKind, SubscriptionId};
use crate::input::{InputState, PointerEvent};
use crate::layer::Layer;
use crate::session::{
    DrawOptions, Pending, SceneContext, SessionGate, SessionHolder, SessionMode,
};
use crate::shapes::{ShapeDescriptor, ShapeId, ShapeKind};
use crate::tools::ShapeTool;
use crate::viewport::Viewport;

/// Authoring engine bound to one viewport and one layer.
///
/// All tools share a single [`SessionGate`], so at most one draw or edit runs
/// at a time across every shape kind.
pub struct Authoring<V: Viewport, L: Layer> {
    viewport: V,
    layer: L,
    gate: SessionGate,
    config: AuthoringConfig,
    input: InputState,
    tools: HashMap<ShapeKind, ShapeTool>,
}

impl<V: Viewport, L: Layer> Authoring<V, L> {
    pub fn new(mut viewport: V, layer: L, config: AuthoringConfig) -> Self {
        viewport.set_pick_tolerance(config.pick_tolerance);
        let gate = SessionGate::new();
        let tools = ShapeKind::ALL
            .into_iter()
            .map(|kind| (kind, ShapeTool::new(kind, gate.clone(), config.clone())))
            .collect();
        Self {
            viewport,
            layer,
            input: InputState::new(config.click_tolerance, config.synthesize_clicks),
            gate,
            config,
            tools,
        }
    }

    pub fn config(&self) -> &AuthoringConfig {
        &self.config
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut L {
        &mut self.layer
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    /// The session currently holding the gate.
    pub fn active_session(&self) -> Option<SessionHolder> {
        self.gate.holder()
    }

    /// Whether a session is installed and receiving pointer input.
    pub fn has_input_handler(&self) -> bool {
        self.tools.values().any(ShapeTool::is_active)
    }

    pub fn tool(&self, kind: ShapeKind) -> &ShapeTool {
        &self.tools[&kind]
    }

    pub fn draw(&mut self, kind: ShapeKind, options: DrawOptions) -> Pending<ShapeDescriptor> {
        self.tool_mut(kind).draw(options)
    }

    pub fn edit(&mut self, kind: ShapeKind, id: ShapeId) -> Pending<ShapeDescriptor> {
        let (tool, mut ctx) = self.split(kind);
        tool.edit(id, &mut ctx)
    }

    pub fn interrupt(&mut self, kind: ShapeKind) -> bool {
        let (tool, mut ctx) = self.split(kind);
        tool.interrupt(&mut ctx)
    }

    /// Interrupt whichever draw is running.
    pub fn interrupt_active(&mut self) -> bool {
        match self.gate.holder() {
            Some(holder) => self.interrupt(holder.kind),
            None => false,
        }
    }

    /// Close whichever edit is running, putting its shape back unchanged.
    pub fn abandon_edit(&mut self) -> bool {
        match self.gate.holder() {
            Some(holder) if holder.mode == SessionMode::Edit => {
                let (tool, mut ctx) = self.split(holder.kind);
                tool.abandon_edit(&mut ctx)
            }
            _ => false,
        }
    }

    pub fn finish(&mut self, kind: ShapeKind) -> bool {
        let (tool, mut ctx) = self.split(kind);
        tool.finish(&mut ctx)
    }

    pub fn remove(&mut self, kind: ShapeKind, id: Option<ShapeId>) -> SessionResult<usize> {
        let (tool, mut ctx) = self.split(kind);
        tool.remove(id, &mut ctx)
    }

    pub fn subscribe(
        &mut self,
        kind: ShapeKind,
        event: EventKind,
        handler: EventHandler,
    ) -> SubscriptionId {
        self.tool_mut(kind).subscribe(event, handler)
    }

    pub fn unsubscribe(&mut self, kind: ShapeKind, event: EventKind, id: SubscriptionId) -> bool {
        self.tool_mut(kind).unsubscribe(event, id)
    }

    /// Deliver host pointer input to the session holding the gate.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        for event in self.input.process(event) {
            let Some(holder) = self.gate.holder() else {
                continue;
            };
            let (tool, mut ctx) = self.split(holder.kind);
            tool.handle_pointer(event, &mut ctx);
        }
    }

    fn tool_mut(&mut self, kind: ShapeKind) -> &mut ShapeTool {
        self.tools
            .entry(kind)
            .or_insert_with(|| ShapeTool::new(kind, self.gate.clone(), self.config.clone()))
    }

    fn split(&mut self, kind: ShapeKind) -> (&mut ShapeTool, SceneContext<'_>) {
        let tool = self
            .tools
            .entry(kind)
            .or_insert_with(|| ShapeTool::new(kind, self.gate.clone(), self.config.clone()));
        (tool, SceneContext::new(&mut self.viewport, &mut self.layer))
    }
}

impl<V: Viewport, L: Layer> Drop for Authoring<V, L> {
    fn drop(&mut self) {
        // Shapes taken out for editing belong to the layer, which may outlive us.
        if self.abandon_edit() {
            log::debug!("open edit closed on shutdown");
        }
    }
}
