//! Scene seam: projection, picking, preview primitives and navigation.

use crate::camera::Camera;
use crate::geo::GeoPoint;
use crate::geometry::Outline;
use crate::shapes::ShapeKind;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a primitive owned by the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrimitiveId(pub u64);

/// Something a session asks the viewport to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Live preview of a shape being drawn or edited.
    Outline { kind: ShapeKind, outline: Outline },
    /// Draggable handle on one control point.
    Marker { position: GeoPoint, index: usize },
}

/// The host scene as seen by authoring sessions.
pub trait Viewport {
    /// Project a screen point onto the reference surface.
    ///
    /// `None` means the pointer is off the surface.
    fn project_to_surface(&self, screen: Point) -> Option<GeoPoint>;

    /// Topmost pickable primitive under a screen point.
    fn pick(&self, screen: Point) -> Option<PrimitiveId>;

    fn add_primitive(&mut self, primitive: Primitive) -> PrimitiveId;

    fn update_primitive(&mut self, id: PrimitiveId, primitive: Primitive);

    /// Returns `false` if the primitive was already gone.
    fn remove_primitive(&mut self, id: PrimitiveId) -> bool;

    /// Enable or disable camera navigation.
    fn set_navigation_enabled(&mut self, enabled: bool);

    /// Radius in screen pixels within which `pick` reports a marker.
    fn set_pick_tolerance(&mut self, tolerance: f64);
}

/// Viewport without a renderer.
///
/// Projects through a [`Camera`], optionally clipped to a surface extent, and
/// picks markers by screen distance. Primitives are only recorded.
#[derive(Debug, Clone)]
pub struct OffscreenViewport {
    pub camera: Camera,
    /// Surface bounds in lon/lat; screen points outside project to `None`.
    pub extent: Option<Rect>,
    /// Height assigned to projected points.
    pub surface_height: f64,
    /// Marker hit radius in screen pixels.
    pub pick_tolerance: f64,
    primitives: BTreeMap<PrimitiveId, Primitive>,
    next_id: u64,
    navigation_enabled: bool,
}

impl Default for OffscreenViewport {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            extent: None,
            surface_height: 0.0,
            pick_tolerance: 8.0,
            primitives: BTreeMap::new(),
            next_id: 1,
            navigation_enabled: true,
        }
    }
}

impl OffscreenViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extent(mut self, extent: Rect) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn primitive(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(&id)
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn primitives(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> {
        self.primitives.iter().map(|(id, p)| (*id, p))
    }

    /// Live preview outlines.
    pub fn outlines(&self) -> Vec<&Outline> {
        self.primitives
            .values()
            .filter_map(|p| match p {
                Primitive::Outline { outline, .. } => Some(outline),
                Primitive::Marker { .. } => None,
            })
            .collect()
    }

    pub fn marker_count(&self) -> usize {
        self.primitives
            .values()
            .filter(|p| matches!(p, Primitive::Marker { .. }))
            .count()
    }

    pub fn is_navigation_enabled(&self) -> bool {
        self.navigation_enabled
    }

    /// Screen position of a surface point.
    pub fn to_screen(&self, position: GeoPoint) -> Point {
        self.camera.surface_to_screen(position.planar())
    }
}

impl Viewport for OffscreenViewport {
    fn project_to_surface(&self, screen: Point) -> Option<GeoPoint> {
        if !(screen.x.is_finite() && screen.y.is_finite()) {
            return None;
        }
        let surface = self.camera.screen_to_surface(screen);
        if let Some(extent) = self.extent {
            // Inclusive bounds; `Rect::contains` excludes the far edges.
            let inside = surface.x >= extent.x0
                && surface.x <= extent.x1
                && surface.y >= extent.y0
                && surface.y <= extent.y1;
            if !inside {
                return None;
            }
        }
        Some(GeoPoint::from_planar(surface, self.surface_height))
    }

    fn pick(&self, screen: Point) -> Option<PrimitiveId> {
        let tolerance_sq = self.pick_tolerance * self.pick_tolerance;
        self.primitives
            .iter()
            .filter_map(|(id, primitive)| match primitive {
                Primitive::Marker { position, .. } => {
                    let dist_sq = (self.to_screen(*position) - screen).hypot2();
                    (dist_sq <= tolerance_sq).then_some((*id, dist_sq))
                }
                Primitive::Outline { .. } => None,
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn add_primitive(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        self.primitives.insert(id, primitive);
        id
    }

    fn update_primitive(&mut self, id: PrimitiveId, primitive: Primitive) {
        if let Some(slot) = self.primitives.get_mut(&id) {
            *slot = primitive;
        } else {
            log::warn!("update of unknown primitive {:?}", id);
        }
    }

    fn remove_primitive(&mut self, id: PrimitiveId) -> bool {
        self.primitives.remove(&id).is_some()
    }

    fn set_navigation_enabled(&mut self, enabled: bool) {
        self.navigation_enabled = enabled;
    }

    fn set_pick_tolerance(&mut self, tolerance: f64) {
        self.pick_tolerance = tolerance;
    }
}
