//! Surface positions.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A position on the reference surface (degrees, metres).
///
/// The geometry kernel treats `(lon, lat)` as planar coordinates; height is
/// carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub height: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64, height: f64) -> Self {
        Self { lon, lat, height }
    }

    /// A position on the surface itself (height 0).
    pub const fn surface(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat, 0.0)
    }

    /// Planar projection used by the geometry kernel.
    pub fn planar(&self) -> Point {
        Point::new(self.lon, self.lat)
    }

    /// Lift a planar point back to the surface at the given height.
    pub fn from_planar(point: Point, height: f64) -> Self {
        Self::new(point.x, point.y, height)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::surface(lon, lat)
    }
}

impl From<(f64, f64, f64)> for GeoPoint {
    fn from((lon, lat, height): (f64, f64, f64)) -> Self {
        Self::new(lon, lat, height)
    }
}
