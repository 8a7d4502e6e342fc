//! Per-shape authoring API.
//!
//! One [`ShapeTool`] exists per shape kind. It starts draw and edit sessions,
//! owns the event bus its sessions publish on, and routes pointer input to
//! whichever session it is running.

use uuid::Uuid;

use crate::config::AuthoringConfig;
use crate::error::{SessionError, SessionResult};
use crate::events::{EventBus, EventHandler, EventKind, SubscriptionId};
use crate::input::PointerEvent;
use crate::session::draw::DrawSession;
use crate::session::edit::EditSession;
use crate::session::{
    DrawOptions, Pending, SceneContext, SessionGate, SessionMode, Step, pending,
};
use crate::shapes::{
    CircleParams, EditSupport, ShapeDescriptor, ShapeId, ShapeKind, ShapeParameters, ShapeSpec,
};

/// What a tool is doing right now.
enum ToolState {
    Idle,
    Drawing(DrawSession),
    Editing(EditSession),
}

pub struct ShapeTool {
    spec: ShapeSpec,
    gate: SessionGate,
    config: AuthoringConfig,
    bus: EventBus,
    state: ToolState,
}

impl std::fmt::Debug for ShapeTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeTool")
            .field("kind", &self.spec.kind)
            .field("active", &self.active_shape())
            .field("bus", &self.bus)
            .finish()
    }
}

impl ShapeTool {
    pub fn new(kind: ShapeKind, gate: SessionGate, config: AuthoringConfig) -> Self {
        Self {
            spec: kind.spec(),
            gate,
            config,
            bus: EventBus::new(),
            state: ToolState::Idle,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.spec.kind
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// Id of the shape being drawn or edited.
    pub fn active_shape(&self) -> Option<ShapeId> {
        match &self.state {
            ToolState::Idle => None,
            ToolState::Drawing(session) => Some(session.id()),
            ToolState::Editing(session) => Some(session.original().id),
        }
    }

    /// Start drawing a new shape.
    ///
    /// Nothing is installed if another session holds the gate or the
    /// parameters are unusable; the returned result is already rejected.
    pub fn draw(&mut self, options: DrawOptions) -> Pending<ShapeDescriptor> {
        let kind = self.spec.kind;
        if self.gate.is_busy() {
            log::warn!("{} draw refused: {}", kind, SessionError::Busy);
            return Pending::rejected(SessionError::Busy);
        }

        let parameters = self.resolve_parameters(options.parameters.clone());
        if let Err(reason) = parameters.validate(kind) {
            log::warn!("{} draw refused: {}", kind, reason);
            return Pending::rejected(SessionError::InvalidParameters(reason));
        }

        let Some(token) = self.gate.try_acquire(kind, SessionMode::Draw) else {
            return Pending::rejected(SessionError::Busy);
        };
        let id = options.id.unwrap_or_else(Uuid::new_v4);
        let (completer, result) = pending::channel();
        let options = DrawOptions {
            parameters,
            ..options
        };
        log::debug!("{} draw {} started", kind, id);
        self.state = ToolState::Drawing(DrawSession::new(self.spec, id, options, token, completer));
        result
    }

    /// Start editing the stored shape `id`.
    pub fn edit(&mut self, id: ShapeId, ctx: &mut SceneContext<'_>) -> Pending<ShapeDescriptor> {
        match self.try_edit(id, ctx) {
            Ok(result) => result,
            Err(err) => {
                log::warn!("{} edit of {} refused: {}", self.spec.kind, id, err);
                Pending::rejected(err)
            }
        }
    }

    fn try_edit(
        &mut self,
        id: ShapeId,
        ctx: &mut SceneContext<'_>,
    ) -> SessionResult<Pending<ShapeDescriptor>> {
        let kind = self.spec.kind;
        if let EditSupport::Unsupported(reason) = self.spec.editing {
            return Err(SessionError::Unsupported { kind, reason });
        }
        if self.gate.is_busy() {
            return Err(SessionError::Busy);
        }
        if !ctx.layer.get(id).is_some_and(|shape| shape.kind == kind) {
            return Err(SessionError::NotFound { kind, id });
        }
        let token = self
            .gate
            .try_acquire(kind, SessionMode::Edit)
            .ok_or(SessionError::Busy)?;
        let original = ctx.layer.remove(id)?;
        let (completer, result) = pending::channel();
        log::debug!("{} edit {} started", kind, id);
        self.state = ToolState::Editing(EditSession::start(self.spec, original, ctx, token, completer));
        Ok(result)
    }

    /// Abort the running draw. Returns `false` when there was nothing to abort.
    ///
    /// Edit sessions are not interruptible; they end with a commit click.
    pub fn interrupt(&mut self, ctx: &mut SceneContext<'_>) -> bool {
        match std::mem::replace(&mut self.state, ToolState::Idle) {
            ToolState::Drawing(session) => {
                session.abort(ctx, SessionError::Interrupted);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Explicit finish action for the running draw.
    ///
    /// Ends unbounded point draws and stands in for the secondary click.
    pub fn finish(&mut self, ctx: &mut SceneContext<'_>) -> bool {
        match std::mem::replace(&mut self.state, ToolState::Idle) {
            ToolState::Drawing(session) => {
                session.complete(ctx, &mut self.bus);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Close the running edit without committing it.
    ///
    /// The stored shape is put back as it was and the edit resolves with
    /// [`SessionError::Abandoned`]. Returns `false` when no edit is running.
    pub fn abandon_edit(&mut self, ctx: &mut SceneContext<'_>) -> bool {
        match std::mem::replace(&mut self.state, ToolState::Idle) {
            ToolState::Editing(session) => {
                session.abandon(ctx);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Remove one stored shape of this kind, or all of them. Returns how many went.
    pub fn remove(&mut self, id: Option<ShapeId>, ctx: &mut SceneContext<'_>) -> SessionResult<usize> {
        let kind = self.spec.kind;
        let ids = match id {
            Some(id) => {
                if !ctx.layer.get(id).is_some_and(|shape| shape.kind == kind) {
                    return Err(SessionError::NotFound { kind, id });
                }
                vec![id]
            }
            None => ctx
                .layer
                .list()
                .into_iter()
                .filter(|id| ctx.layer.get(*id).is_some_and(|shape| shape.kind == kind))
                .collect(),
        };
        for id in &ids {
            ctx.layer.remove(*id)?;
        }
        log::debug!("removed {} {} shape(s)", ids.len(), kind);
        Ok(ids.len())
    }

    pub fn subscribe(&mut self, event: EventKind, handler: EventHandler) -> SubscriptionId {
        self.bus.on(event, handler)
    }

    pub fn unsubscribe(&mut self, event: EventKind, id: SubscriptionId) -> bool {
        self.bus.off(event, id)
    }

    pub fn handler_count(&self, event: EventKind) -> usize {
        self.bus.handler_count(event)
    }

    /// Feed one pointer event to the running session.
    pub fn handle_pointer(&mut self, event: PointerEvent, ctx: &mut SceneContext<'_>) {
        let step = match &mut self.state {
            ToolState::Idle => return,
            ToolState::Drawing(session) => session.handle(event, ctx, &mut self.bus),
            ToolState::Editing(session) => session.handle(event, ctx, &mut self.bus),
        };
        if step == Step::Continue {
            return;
        }
        match std::mem::replace(&mut self.state, ToolState::Idle) {
            ToolState::Drawing(session) => session.complete(ctx, &mut self.bus),
            ToolState::Editing(session) => session.commit(ctx, &mut self.bus),
            ToolState::Idle => {}
        }
    }

    /// Fill in defaults, taking circle resolution from the configuration.
    fn resolve_parameters(&self, parameters: ShapeParameters) -> ShapeParameters {
        match (self.spec.kind, parameters) {
            (ShapeKind::Circle, ShapeParameters::Plain) => ShapeParameters::Circle(CircleParams {
                segments: self.config.circle_segments,
            }),
            (kind, parameters) => parameters.resolve(kind),
        }
    }
}
