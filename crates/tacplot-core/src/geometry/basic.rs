//! Outlines for the non-parametric shapes.

use crate::geo::GeoPoint;
use crate::shapes::{ShapeKind, ShapeParameters};
use kurbo::{Point, Vec2};
use std::f64::consts::TAU;

use super::{GeometryResult, Outline, base_height, lift, require};

/// Point-like symbols: the anchors themselves.
fn anchors(kind: ShapeKind, points: &[GeoPoint]) -> GeometryResult<Outline> {
    require(kind, points, 1)?;
    Ok(Outline::open(points.to_vec()))
}

pub fn point(points: &[GeoPoint], _params: &ShapeParameters) -> GeometryResult<Outline> {
    anchors(ShapeKind::Point, points)
}

pub fn billboard(points: &[GeoPoint], _params: &ShapeParameters) -> GeometryResult<Outline> {
    anchors(ShapeKind::Billboard, points)
}

pub fn label(points: &[GeoPoint], _params: &ShapeParameters) -> GeometryResult<Outline> {
    anchors(ShapeKind::Label, points)
}

pub fn model(points: &[GeoPoint], _params: &ShapeParameters) -> GeometryResult<Outline> {
    anchors(ShapeKind::Model, points)
}

pub fn polyline(points: &[GeoPoint], _params: &ShapeParameters) -> GeometryResult<Outline> {
    require(ShapeKind::Polyline, points, 2)?;
    Ok(Outline::open(points.to_vec()))
}

pub fn polygon(points: &[GeoPoint], _params: &ShapeParameters) -> GeometryResult<Outline> {
    require(ShapeKind::Polygon, points, 3)?;
    Ok(Outline::ring(points.to_vec()))
}

/// Axis-aligned (in lon/lat) rectangle from two opposite corners.
pub fn rectangle(points: &[GeoPoint], _params: &ShapeParameters) -> GeometryResult<Outline> {
    require(ShapeKind::Rectangle, points, 2)?;
    let a = points[0].planar();
    let b = points[1].planar();
    let corners = [a, Point::new(b.x, a.y), b, Point::new(a.x, b.y)];
    Ok(Outline::ring(lift(&corners, base_height(points))))
}

/// Planar circle from its centre and a rim point.
pub fn circle(points: &[GeoPoint], params: &ShapeParameters) -> GeometryResult<Outline> {
    require(ShapeKind::Circle, points, 2)?;
    let center = points[0].planar();
    let radius = center.distance(points[1].planar());
    let segments = params.circle().segments.max(3);

    let rim: Vec<Point> = (0..segments)
        .map(|i| center + Vec2::from_angle(TAU * i as f64 / segments as f64) * radius)
        .collect();
    Ok(Outline::ring(lift(&rim, base_height(points))))
}

/// Wall footprint; the extrusion height travels in the parameters.
pub fn wall(points: &[GeoPoint], _params: &ShapeParameters) -> GeometryResult<Outline> {
    require(ShapeKind::Wall, points, 2)?;
    Ok(Outline::open(points.to_vec()))
}

pub fn stroke(points: &[GeoPoint], _params: &ShapeParameters) -> GeometryResult<Outline> {
    require(ShapeKind::Stroke, points, 2)?;
    Ok(Outline::open(points.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::CircleParams;

    fn pts(coords: &[(f64, f64)]) -> Vec<GeoPoint> {
        coords.iter().map(|&c| GeoPoint::from(c)).collect()
    }

    #[test]
    fn test_empty_point_kinds_name_their_kind() {
        for kind in [ShapeKind::Point, ShapeKind::Billboard, ShapeKind::Label, ShapeKind::Model] {
            let err = (kind.spec().geometry)(&[], &ShapeParameters::Plain).unwrap_err();
            assert_eq!(
                err,
                crate::geometry::GeometryError::TooFewPoints {
                    kind,
                    required: 1,
                    actual: 0
                }
            );
            assert!(err.to_string().starts_with(kind.name()));
        }
    }

    #[test]
    fn test_polyline_needs_two_points() {
        assert!(polyline(&pts(&[(0.0, 0.0)]), &ShapeParameters::Plain).is_err());
        let line = polyline(&pts(&[(0.0, 0.0), (1.0, 1.0)]), &ShapeParameters::Plain).unwrap();
        assert!(!line.closed);
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn test_polygon_keeps_heights() {
        let anchors = vec![
            GeoPoint::new(0.0, 0.0, 5.0),
            GeoPoint::new(1.0, 0.0, 6.0),
            GeoPoint::new(0.0, 1.0, 7.0),
        ];
        let ring = polygon(&anchors, &ShapeParameters::Plain).unwrap();
        assert_eq!(&ring.positions[..3], &anchors[..]);
    }

    #[test]
    fn test_rectangle_corners() {
        let ring = rectangle(&pts(&[(0.0, 0.0), (2.0, 1.0)]), &ShapeParameters::Plain).unwrap();
        let corners: Vec<(f64, f64)> = ring.positions.iter().map(|p| (p.lon, p.lat)).collect();
        assert_eq!(
            corners,
            vec![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn test_circle_samples_on_radius() {
        let params = ShapeParameters::Circle(CircleParams { segments: 16 });
        let ring = circle(&pts(&[(10.0, 10.0), (12.0, 10.0)]), &params).unwrap();
        assert_eq!(ring.len(), 17);
        let center = Point::new(10.0, 10.0);
        for p in &ring.positions {
            assert!((p.planar().distance(center) - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_circle_does_not_panic() {
        let ring = circle(&pts(&[(1.0, 1.0), (1.0, 1.0)]), &ShapeParameters::Plain).unwrap();
        assert!(ring.positions.iter().all(|p| p.lon == 1.0 && p.lat == 1.0));
    }
}
