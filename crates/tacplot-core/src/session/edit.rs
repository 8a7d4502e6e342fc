//! Edit session: drag the vertices of a finished shape.

use super::{Completer, SceneContext, SessionToken, Step, hide, show};
use crate::error::{SessionError, SessionResult};
use crate::events::{EventBus, EventKind, InteractionEvent};
use crate::geo::GeoPoint;
use crate::geometry::Outline;
use crate::input::PointerEvent;
use crate::shapes::{ShapeDescriptor, ShapeSpec};
use crate::viewport::{Primitive, PrimitiveId, Viewport};
use kurbo::Point;

pub(crate) struct EditSession {
    spec: ShapeSpec,
    /// The shape as it was taken out of the layer.
    original: ShapeDescriptor,
    points: Vec<GeoPoint>,
    /// One marker per control point, same order.
    markers: Vec<PrimitiveId>,
    preview: Option<PrimitiveId>,
    /// Vertex being dragged.
    dragging: Option<usize>,
    token: SessionToken,
    completer: Completer<ShapeDescriptor>,
}

impl EditSession {
    /// Show the preview and one marker per vertex for a shape already taken
    /// out of the layer.
    pub(crate) fn start(
        spec: ShapeSpec,
        original: ShapeDescriptor,
        ctx: &mut SceneContext<'_>,
        token: SessionToken,
        completer: Completer<ShapeDescriptor>,
    ) -> Self {
        let points = original.control_points.clone();
        let markers = points
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                ctx.viewport
                    .add_primitive(Primitive::Marker { position, index })
            })
            .collect();
        let mut session = Self {
            spec,
            original,
            points,
            markers,
            preview: None,
            dragging: None,
            token,
            completer,
        };
        session.refresh(ctx.viewport);
        session
    }

    pub(crate) fn original(&self) -> &ShapeDescriptor {
        &self.original
    }

    pub(crate) fn handle(
        &mut self,
        event: PointerEvent,
        ctx: &mut SceneContext<'_>,
        bus: &mut EventBus,
    ) -> Step {
        match event {
            PointerEvent::Down { position, button } if button.is_primary() => {
                if let Some(index) = self.marker_at(ctx.viewport, position) {
                    log::debug!("{} vertex {} grabbed", self.spec.kind, index);
                    self.dragging = Some(index);
                    ctx.viewport.set_navigation_enabled(false);
                }
                Step::Continue
            }
            PointerEvent::Move { position } => {
                let Some(index) = self.dragging else {
                    return Step::Continue;
                };
                let Some(point) = ctx.viewport.project_to_surface(position) else {
                    return Step::Continue;
                };
                self.points[index] = point;
                ctx.viewport.update_primitive(
                    self.markers[index],
                    Primitive::Marker {
                        position: point,
                        index,
                    },
                );
                self.refresh(ctx.viewport);
                self.emit(bus, EventKind::EditMove, Some(index));
                Step::Continue
            }
            PointerEvent::Up { button, .. } if button.is_primary() => {
                if let Some(index) = self.dragging.take() {
                    ctx.viewport.set_navigation_enabled(true);
                    self.emit(bus, EventKind::EditCertain, Some(index));
                }
                Step::Continue
            }
            PointerEvent::Click { position, button } if button.is_primary() => {
                // A click away from every marker commits the edit.
                if self.dragging.is_some() || self.marker_at(ctx.viewport, position).is_some() {
                    Step::Continue
                } else {
                    Step::Finish
                }
            }
            _ => Step::Continue,
        }
    }

    fn marker_at(&self, viewport: &dyn Viewport, position: Point) -> Option<usize> {
        let hit = viewport.pick(position)?;
        self.markers.iter().position(|&marker| marker == hit)
    }

    fn refresh(&mut self, viewport: &mut dyn Viewport) {
        let outline = (self.spec.geometry)(&self.points, &self.original.parameters)
            .unwrap_or_else(|_| Outline::open(self.points.clone()));
        let primitive = Primitive::Outline {
            kind: self.spec.kind,
            outline,
        };
        show(viewport, &mut self.preview, primitive);
    }

    fn emit(&self, bus: &mut EventBus, kind: EventKind, index: Option<usize>) {
        bus.emit(&InteractionEvent::new(
            self.spec.kind,
            kind,
            self.original.id,
            index,
            &self.points,
        ));
    }

    fn teardown(&mut self, viewport: &mut dyn Viewport) {
        for marker in self.markers.drain(..) {
            viewport.remove_primitive(marker);
        }
        hide(viewport, &mut self.preview);
        self.dragging = None;
        viewport.set_navigation_enabled(true);
    }

    /// Replace the stored shape with the edited one and release.
    ///
    /// If the edited shape cannot be stored, the original goes back into the
    /// layer and the edit is rejected.
    pub(crate) fn commit(mut self, ctx: &mut SceneContext<'_>, bus: &mut EventBus) {
        self.teardown(ctx.viewport);
        let original = &self.original;
        let result: SessionResult<ShapeDescriptor> = ShapeDescriptor::build(
            original.id,
            original.kind,
            self.points.clone(),
            original.parameters.clone(),
        )
        .map_err(SessionError::from)
        .and_then(|edited| {
            ctx.layer.save(edited.id, edited.clone())?;
            Ok(edited)
        });

        match result {
            Ok(edited) => {
                self.emit(bus, EventKind::EditFinish, None);
                log::info!("{} {} edited", self.spec.kind, edited.id);
                self.token.release();
                self.completer.resolve(edited);
            }
            Err(err) => {
                log::warn!("{} edit of {} rejected: {}", self.spec.kind, self.original.id, err);
                self.restore(ctx);
                self.token.release();
                self.completer.reject(err);
            }
        }
    }

    /// End without committing: the original shape goes back into the layer
    /// unchanged and the edit resolves as abandoned.
    pub(crate) fn abandon(mut self, ctx: &mut SceneContext<'_>) {
        self.teardown(ctx.viewport);
        self.restore(ctx);
        log::debug!("{} edit of {} abandoned", self.spec.kind, self.original.id);
        self.token.release();
        self.completer.reject(SessionError::Abandoned);
    }

    fn restore(&self, ctx: &mut SceneContext<'_>) {
        if let Err(err) = ctx.layer.save(self.original.id, self.original.clone()) {
            log::warn!("could not restore {}: {}", self.original.id, err);
        }
    }
}
