//! Tapered arrow glyphs: straight and attack arrows, plus the head and body
//! builders the pincer arrow reuses.

use crate::geo::GeoPoint;
use crate::shapes::{ShapeKind, ShapeParameters};
use kurbo::Point;
use std::f64::consts::PI;

use super::math::{
    HALF_PI, angle_of_three_points, base_length, distance, is_clockwise, mid,
    quadratic_bspline_points, third_point, whole_distance,
};
use super::{GeometryResult, Outline, base_height, lift, require};

/// Proportions of an arrow head relative to the shaft.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeadProportions {
    pub head_height_factor: f64,
    pub head_width_factor: f64,
    pub neck_height_factor: f64,
    pub neck_width_factor: f64,
}

/// Head outline: `[neck_left, head_left, tip, head_right, neck_right]`.
pub(crate) type ArrowHead = [Point; 5];

/// Build the head at the end of `bone`.
///
/// With `tail_cap`, the head height is limited to that value and to the length
/// of the last shaft segment, keeping heads on short, wide arrows in check.
pub(crate) fn arrow_head(bone: &[Point], head: HeadProportions, tail_cap: Option<f64>) -> ArrowHead {
    let tip = bone[bone.len() - 1];
    let prev = bone[bone.len() - 2];

    let mut head_height = base_length(bone) * head.head_height_factor;
    if let Some(cap) = tail_cap {
        head_height = head_height.min(cap);
    }
    let head_width = head_height * head.head_width_factor;
    let neck_width = head_height * head.neck_width_factor;
    if tail_cap.is_some() {
        head_height = head_height.min(distance(tip, prev));
    }
    let neck_height = head_height * head.neck_height_factor;

    let head_end = third_point(prev, tip, 0.0, head_height, true);
    let neck_end = third_point(prev, tip, 0.0, neck_height, true);
    let head_left = third_point(tip, head_end, HALF_PI, head_width, false);
    let head_right = third_point(tip, head_end, HALF_PI, head_width, true);
    let neck_left = third_point(tip, neck_end, HALF_PI, neck_width, false);
    let neck_right = third_point(tip, neck_end, HALF_PI, neck_width, true);

    [neck_left, head_left, tip, head_right, neck_right]
}

/// Body edge points at every interior bone vertex.
///
/// The half-width shrinks linearly along the bone from the tail width to the
/// neck width; each offset is divided by the sine of the half-turn angle so
/// the edges stay parallel through bends. Returns `(left, right)`.
pub(crate) fn arrow_body(
    bone: &[Point],
    neck_left: Point,
    neck_right: Point,
    tail_width_factor: f64,
) -> (Vec<Point>, Vec<Point>) {
    let all_len = whole_distance(bone);
    let tail_width = base_length(bone) * tail_width_factor;
    let neck_width = distance(neck_left, neck_right);
    let width_dif = (tail_width - neck_width) / 2.0;

    let mut travelled = 0.0;
    let mut left = Vec::with_capacity(bone.len().saturating_sub(2));
    let mut right = Vec::with_capacity(bone.len().saturating_sub(2));
    for w in bone.windows(3) {
        let (prev, cur, next) = (w[0], w[1], w[2]);
        let angle = angle_of_three_points(prev, cur, next) / 2.0;
        travelled += distance(prev, cur);
        let half_width = (tail_width / 2.0 - travelled / all_len * width_dif) / angle.sin();
        left.push(third_point(prev, cur, PI - angle, half_width, true));
        right.push(third_point(prev, cur, angle, half_width, false));
    }
    (left, right)
}

/// Two-anchor arrow: `[tail, tip]`. Closed ring of seven corners.
pub fn straight_arrow(points: &[GeoPoint], params: &ShapeParameters) -> GeometryResult<Outline> {
    require(ShapeKind::StraightArrow, points, 2)?;
    let p = params.straight_arrow();
    let tail = points[0].planar();
    let tip = points[1].planar();

    let len = base_length(&[tail, tip]);
    let tail_width = len * p.tail_width_factor;
    let neck_width = len * p.neck_width_factor;
    let head_width = len * p.head_width_factor;

    let tail_left = third_point(tip, tail, HALF_PI, tail_width, true);
    let tail_right = third_point(tip, tail, HALF_PI, tail_width, false);
    let head_left = third_point(tail, tip, p.head_angle, head_width, false);
    let head_right = third_point(tail, tip, p.head_angle, head_width, true);
    let neck_left = third_point(tail, tip, p.neck_angle, neck_width, false);
    let neck_right = third_point(tail, tip, p.neck_angle, neck_width, true);

    let corners = [tail_left, neck_left, head_left, tip, head_right, neck_right, tail_right];
    Ok(Outline::ring(lift(&corners, base_height(points))))
}

/// Attack arrow: `[tail_a, tail_b, shaft..., tip]`.
///
/// The first two anchors span the tail; the shaft starts at their midpoint and
/// runs through the remaining anchors.
pub fn attack_arrow(points: &[GeoPoint], params: &ShapeParameters) -> GeometryResult<Outline> {
    require(ShapeKind::AttackArrow, points, 3)?;
    let p = params.attack_arrow();
    let pts: Vec<Point> = points.iter().map(GeoPoint::planar).collect();

    let (tail_left, tail_right) = if is_clockwise(pts[0], pts[1], pts[2]) {
        (pts[1], pts[0])
    } else {
        (pts[0], pts[1])
    };

    let mut bone = Vec::with_capacity(pts.len() - 1);
    bone.push(mid(tail_left, tail_right));
    bone.extend_from_slice(&pts[2..]);

    let tail_width = distance(tail_left, tail_right);
    let proportions = HeadProportions {
        head_height_factor: p.head_height_factor,
        head_width_factor: p.head_width_factor,
        neck_height_factor: p.neck_height_factor,
        neck_width_factor: p.neck_width_factor,
    };
    let head = arrow_head(&bone, proportions, Some(tail_width * p.head_tail_factor));
    let (neck_left, neck_right) = (head[0], head[4]);

    let bone_length = base_length(&bone);
    let (body_left, body_right) = arrow_body(&bone, neck_left, neck_right, tail_width / bone_length);

    let mut left = vec![tail_left];
    left.extend(body_left);
    left.push(neck_left);
    let mut right = vec![tail_right];
    right.extend(body_right);
    right.push(neck_right);
    let left = quadratic_bspline_points(&left);
    let right = quadratic_bspline_points(&right);

    let mut ring = left;
    ring.extend_from_slice(&head);
    ring.extend(right.into_iter().rev());
    if p.swallow_tail {
        let notch_depth = bone_length * p.tail_width_factor * p.swallow_tail_factor;
        ring.push(third_point(bone[1], bone[0], 0.0, notch_depth, true));
    }
    Ok(Outline::ring(lift(&ring, base_height(points))))
}
