//! Pincer (double) arrow: two shafts converging from a shared joint.
//!
//! Anchors are `[tail_a, tail_b, tip_a, tip_b?, joint?]`:
//!
//! - 3 anchors: `tip_b` is `tip_a` mirrored across the perpendicular bisector
//!   of the tails, so both arms are symmetric.
//! - 3 or 4 anchors: the joint is the midpoint of the tails.
//! - 5 anchors: every point is used as given.

use crate::geo::GeoPoint;
use crate::shapes::{ShapeKind, ShapeParameters};
use kurbo::Point;

use super::arrow::{ArrowHead, HeadProportions, arrow_body, arrow_head};
use super::math::{
    HALF_PI, base_length, bezier_points, distance, is_clockwise, mid, reflect_across_bisector,
    third_point,
};
use super::{GeometryResult, Outline, base_height, lift, require};

/// Fractions of the arm length where the bone bends away from the straight line.
const NEAR_BEND: f64 = 0.3;
const FAR_BEND: f64 = 0.5;
/// Sideways offsets of the two bends, as fractions of the arm length.
const NEAR_BEND_OFFSET: f64 = 1.0 / 5.0;
const FAR_BEND_OFFSET: f64 = 1.0 / 4.0;

/// One arm of the pincer, split around its head.
struct Arm {
    /// From the arm's second base point up to the neck.
    leading: Vec<Point>,
    head: ArrowHead,
    /// From the opposite neck back down to the first base point.
    trailing: Vec<Point>,
}

/// Build one curved arm whose base spans `base_a`-`base_b` and whose tip is `tip`.
fn arm(base_a: Point, base_b: Point, tip: Point, clockwise: bool, head: HeadProportions) -> Arm {
    let root = mid(base_a, base_b);
    let len = distance(root, tip);

    let near = third_point(tip, root, 0.0, len * NEAR_BEND, true);
    let far = third_point(tip, root, 0.0, len * FAR_BEND, true);
    let near = third_point(root, near, HALF_PI, len * NEAR_BEND_OFFSET, clockwise);
    let far = third_point(root, far, HALF_PI, len * FAR_BEND_OFFSET, clockwise);
    let bone = [root, near, far, tip];

    let head_points = arrow_head(&bone, head, None);
    let (neck_left, neck_right) = (head_points[0], head_points[4]);
    let tail_width_factor = distance(base_a, base_b) / base_length(&bone) / 2.0;
    let (body_left, body_right) = arrow_body(&bone, neck_left, neck_right, tail_width_factor);

    let mut leading = vec![base_b];
    leading.extend(body_left);
    leading.push(neck_left);

    let mut trailing = vec![neck_right];
    trailing.extend(body_right.into_iter().rev());
    trailing.push(base_a);

    Arm {
        leading,
        head: head_points,
        trailing,
    }
}

/// Pincer arrow outline.
pub fn pincer_arrow(points: &[GeoPoint], params: &ShapeParameters) -> GeometryResult<Outline> {
    require(ShapeKind::PincerArrow, points, 3)?;
    let p = params.pincer_arrow();
    let proportions = HeadProportions {
        head_height_factor: p.head_height_factor,
        head_width_factor: p.head_width_factor,
        neck_height_factor: p.neck_height_factor,
        neck_width_factor: p.neck_width_factor,
    };

    let tail_a = points[0].planar();
    let tail_b = points[1].planar();
    let tip_a = points[2].planar();
    let tip_b = match points.get(3) {
        Some(p) => p.planar(),
        None => reflect_across_bisector(tail_a, tail_b, tip_a),
    };
    let joint = match points.get(4) {
        Some(p) => p.planar(),
        None => mid(tail_a, tail_b),
    };

    let (first, second) = if is_clockwise(tail_a, tail_b, tip_a) {
        (
            arm(tail_a, joint, tip_b, false, proportions),
            arm(joint, tail_b, tip_a, true, proportions),
        )
    } else {
        (
            arm(tail_b, joint, tip_a, false, proportions),
            arm(joint, tail_a, tip_b, true, proportions),
        )
    };

    // The two inner edges meet at the joint and are smoothed as one curve.
    let mut inner = second.trailing.clone();
    inner.extend_from_slice(&first.leading[1..]);

    let mut ring = bezier_points(&second.leading);
    ring.extend_from_slice(&second.head);
    ring.extend(bezier_points(&inner));
    ring.extend_from_slice(&first.head);
    ring.extend(bezier_points(&first.trailing));

    Ok(Outline::ring(lift(&ring, base_height(points))))
}
