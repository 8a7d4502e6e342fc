//! Draw session: collect anchors, preview, finish.

use serde::{Deserialize, Serialize};

use super::{Completer, SceneContext, SessionToken, Step, hide, show};
use crate::error::{SessionError, SessionResult};
use crate::events::{EventBus, EventKind, InteractionEvent};
use crate::geo::GeoPoint;
use crate::geometry::Outline;
use crate::input::PointerEvent;
use crate::shapes::{FinishTrigger, ShapeDescriptor, ShapeId, ShapeParameters, ShapeSpec};
use crate::viewport::{Primitive, PrimitiveId, Viewport};
use kurbo::Point;

/// Options for one `draw()` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    pub parameters: ShapeParameters,
    /// Clicks after which a point-like draw finishes; 0 keeps it open until `finish()`.
    pub limit: usize,
    /// Hand the finished shape to the layer. Preview-only draws set this to false.
    pub persist: bool,
    /// Id for the new shape instead of a fresh one.
    pub id: Option<ShapeId>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            parameters: ShapeParameters::Plain,
            limit: 1,
            persist: true,
            id: None,
        }
    }
}

impl DrawOptions {
    pub fn with_parameters(parameters: ShapeParameters) -> Self {
        Self {
            parameters,
            ..Default::default()
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn preview_only(mut self) -> Self {
        self.persist = false;
        self
    }

    pub fn id(mut self, id: ShapeId) -> Self {
        self.id = Some(id);
        self
    }
}

pub(crate) struct DrawSession {
    spec: ShapeSpec,
    id: ShapeId,
    parameters: ShapeParameters,
    limit: usize,
    persist: bool,
    points: Vec<GeoPoint>,
    /// The last point follows the pointer and is not committed yet.
    tentative: bool,
    /// Primary button held during a drag-defined draw.
    dragging: bool,
    preview: Option<PrimitiveId>,
    token: SessionToken,
    completer: Completer<ShapeDescriptor>,
}

impl DrawSession {
    pub(crate) fn new(
        spec: ShapeSpec,
        id: ShapeId,
        options: DrawOptions,
        token: SessionToken,
        completer: Completer<ShapeDescriptor>,
    ) -> Self {
        Self {
            spec,
            id,
            parameters: options.parameters,
            limit: options.limit,
            persist: options.persist,
            points: Vec::new(),
            tentative: false,
            dragging: false,
            preview: None,
            token,
            completer,
        }
    }

    pub(crate) fn id(&self) -> ShapeId {
        self.id
    }

    pub(crate) fn handle(
        &mut self,
        event: PointerEvent,
        ctx: &mut SceneContext<'_>,
        bus: &mut EventBus,
    ) -> Step {
        use FinishTrigger::*;

        match (self.spec.finish, event) {
            (Release, PointerEvent::Down { position, button }) if button.is_primary() => {
                self.press(position, ctx, bus)
            }
            (Release, PointerEvent::Move { position }) => self.drag(position, ctx, bus),
            (Release, PointerEvent::Up { position, button }) if button.is_primary() => {
                self.release(position, ctx, bus)
            }
            (Release, _) => Step::Continue,
            (_, PointerEvent::Click { position, button }) if button.is_primary() => {
                self.click(position, ctx, bus)
            }
            (SecondaryClick, PointerEvent::Click { button, .. }) if button.is_secondary() => {
                Step::Finish
            }
            (SecondaryClick, PointerEvent::Move { position }) => self.hover(position, ctx, bus),
            _ => Step::Continue,
        }
    }

    fn click(&mut self, position: Point, ctx: &mut SceneContext<'_>, bus: &mut EventBus) -> Step {
        let Some(point) = ctx.viewport.project_to_surface(position) else {
            log::debug!("{} click off the surface ignored", self.spec.kind);
            return Step::Continue;
        };
        self.drop_tentative();
        self.points.push(point);
        self.emit(bus, EventKind::DrawCertain, Some(self.points.len() - 1));

        let count = self.points.len();
        let reached_limit =
            self.spec.finish == FinishTrigger::Clicks && self.limit != 0 && count >= self.limit;
        let reached_max = self.spec.max_points.is_some_and(|max| count >= max);
        if reached_limit || reached_max {
            return Step::Finish;
        }
        self.refresh(ctx.viewport);
        Step::Continue
    }

    /// Preview "as if" the operator clicked at the pointer.
    fn hover(&mut self, position: Point, ctx: &mut SceneContext<'_>, bus: &mut EventBus) -> Step {
        if self.points.is_empty() {
            return Step::Continue;
        }
        let Some(point) = ctx.viewport.project_to_surface(position) else {
            return Step::Continue;
        };
        self.set_tentative(point);
        self.refresh(ctx.viewport);
        self.emit(bus, EventKind::DrawMove, None);
        Step::Continue
    }

    fn press(&mut self, position: Point, ctx: &mut SceneContext<'_>, bus: &mut EventBus) -> Step {
        if self.dragging {
            return Step::Continue;
        }
        let Some(point) = ctx.viewport.project_to_surface(position) else {
            return Step::Continue;
        };
        self.points.clear();
        self.tentative = false;
        self.points.push(point);
        self.dragging = true;
        ctx.viewport.set_navigation_enabled(false);
        self.emit(bus, EventKind::DrawCertain, Some(0));
        Step::Continue
    }

    fn drag(&mut self, position: Point, ctx: &mut SceneContext<'_>, bus: &mut EventBus) -> Step {
        if !self.dragging {
            return Step::Continue;
        }
        let Some(point) = ctx.viewport.project_to_surface(position) else {
            return Step::Continue;
        };
        if self.spec.max_points.is_some() {
            self.set_tentative(point);
        } else {
            // Free-hand: every sample is kept.
            self.points.push(point);
        }
        self.refresh(ctx.viewport);
        self.emit(bus, EventKind::DrawMove, None);
        Step::Continue
    }

    fn release(&mut self, position: Point, ctx: &mut SceneContext<'_>, bus: &mut EventBus) -> Step {
        if !self.dragging {
            return Step::Continue;
        }
        self.dragging = false;
        ctx.viewport.set_navigation_enabled(true);
        match ctx.viewport.project_to_surface(position) {
            Some(point) => {
                self.drop_tentative();
                self.points.push(point);
            }
            // Released off the surface: the last tracked position becomes final.
            None => self.tentative = false,
        }
        self.emit(bus, EventKind::DrawCertain, Some(self.points.len() - 1));
        Step::Finish
    }

    fn set_tentative(&mut self, point: GeoPoint) {
        match self.points.last_mut() {
            Some(last) if self.tentative => *last = point,
            _ => {
                self.points.push(point);
                self.tentative = true;
            }
        }
    }

    fn drop_tentative(&mut self) {
        if self.tentative {
            self.points.pop();
            self.tentative = false;
        }
    }

    /// Outline once the minimum is reached, a guide line through the anchors before that.
    fn refresh(&mut self, viewport: &mut dyn Viewport) {
        let outline = if self.points.len() >= self.spec.min_points {
            (self.spec.geometry)(&self.points, &self.parameters)
                .unwrap_or_else(|_| Outline::open(self.points.clone()))
        } else {
            Outline::open(self.points.clone())
        };
        let primitive = Primitive::Outline {
            kind: self.spec.kind,
            outline,
        };
        show(viewport, &mut self.preview, primitive);
    }

    fn emit(&self, bus: &mut EventBus, kind: EventKind, index: Option<usize>) {
        bus.emit(&InteractionEvent::new(self.spec.kind, kind, self.id, index, &self.points));
    }

    fn teardown(&mut self, viewport: &mut dyn Viewport) {
        hide(viewport, &mut self.preview);
        self.dragging = false;
        viewport.set_navigation_enabled(true);
    }

    /// Finish the draw: build, persist, announce, release.
    pub(crate) fn complete(mut self, ctx: &mut SceneContext<'_>, bus: &mut EventBus) {
        self.drop_tentative();
        self.teardown(ctx.viewport);
        let result = self.commit(ctx, bus);
        let Self {
            spec,
            id,
            token,
            completer,
            ..
        } = self;
        token.release();
        match result {
            Ok(descriptor) => {
                log::info!("{} {} drawn", spec.kind, id);
                completer.resolve(descriptor);
            }
            Err(err) => {
                log::warn!("{} draw rejected: {}", spec.kind, err);
                completer.reject(err);
            }
        }
    }

    fn commit(
        &mut self,
        ctx: &mut SceneContext<'_>,
        bus: &mut EventBus,
    ) -> SessionResult<ShapeDescriptor> {
        if self.points.len() < self.spec.min_points {
            return Err(SessionError::InsufficientPoints {
                kind: self.spec.kind,
                required: self.spec.min_points,
                actual: self.points.len(),
            });
        }
        let descriptor = ShapeDescriptor::build(
            self.id,
            self.spec.kind,
            std::mem::take(&mut self.points),
            self.parameters.clone(),
        )?;
        if self.persist {
            ctx.layer.save(descriptor.id, descriptor.clone())?;
        }
        bus.emit(&InteractionEvent::new(
            self.spec.kind,
            EventKind::DrawFinish,
            self.id,
            None,
            &descriptor.control_points,
        ));
        Ok(descriptor)
    }

    /// Discard everything and reject with `error`.
    pub(crate) fn abort(mut self, ctx: &mut SceneContext<'_>, error: SessionError) {
        self.teardown(ctx.viewport);
        log::debug!("{} draw {} aborted: {}", self.spec.kind, self.id, error);
        self.token.release();
        self.completer.reject(error);
    }
}
