//! Mapping between screen pixels and surface coordinates.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Planar camera over the reference surface.
///
/// `zoom` is pixels per degree. The default camera maps a screen pixel
/// straight onto the same lon/lat pair, which keeps scripted input readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Screen position of the surface origin
    pub offset: Vec2,
    /// Pixels per degree
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface to screen.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen to surface.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn screen_to_surface(&self, screen: Point) -> Point {
        self.inverse_transform() * screen
    }

    pub fn surface_to_screen(&self, surface: Point) -> Point {
        self.transform() * surface
    }
}
