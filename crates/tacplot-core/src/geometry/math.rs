//! Planar helpers shared by every shape family.
//!
//! All functions work on `(lon, lat)` pairs treated as a flat plane. They are
//! visual approximations for symbology, not geodesic formulas.

use kurbo::{Point, Vec2};
use std::f64::consts::{PI, TAU};

/// Exponent applied to the shaft length before it scales arrow heads.
///
/// Keeps long arrows from growing heads in strict proportion. Empirical value.
pub const BASE_LENGTH_EXPONENT: f64 = 0.99;

/// Parameter step for Bézier sampling (100 samples per curve).
pub const BEZIER_STEP: f64 = 0.01;

/// Parameter step for quadratic B-spline sampling (20 samples per window).
pub const BSPLINE_STEP: f64 = 0.05;

/// Right angle, used for offsets perpendicular to a shaft.
pub const HALF_PI: f64 = PI / 2.0;

pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Length of the polyline through all points.
pub fn whole_distance(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Sub-linear shaft length used to size arrow heads and bodies.
pub fn base_length(points: &[Point]) -> f64 {
    whole_distance(points).powf(BASE_LENGTH_EXPONENT)
}

pub fn mid(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

/// Direction pointing from `end` back to `start`, in `[0, 2π)`.
///
/// Coincident points yield 0 instead of failing.
pub fn azimuth(start: Point, end: Point) -> f64 {
    let angle = (start - end).atan2();
    if angle < 0.0 { angle + TAU } else { angle }
}

/// Angle at `b` swept from `a` to `c`, in `[0, 2π)`.
pub fn angle_of_three_points(a: Point, b: Point, c: Point) -> f64 {
    let angle = azimuth(b, a) - azimuth(b, c);
    if angle < 0.0 { angle + TAU } else { angle }
}

/// Orientation test for the turn `p1 -> p2 -> p3`.
///
/// Named for a y-down screen frame: with latitude pointing up, a `true`
/// result means `p3` lies to the left of `p1 -> p2`.
pub fn is_clockwise(p1: Point, p2: Point, p3: Point) -> bool {
    (p3.y - p1.y) * (p2.x - p1.x) > (p2.y - p1.y) * (p3.x - p1.x)
}

/// Third-point construction.
///
/// Takes the direction from `end` back towards `start`, rotates it by `angle`
/// (counter to the rotation sense when `clockwise` is false) and steps
/// `radius` away from `end`.
pub fn third_point(start: Point, end: Point, angle: f64, radius: f64, clockwise: bool) -> Point {
    let azimuth = azimuth(start, end);
    let alpha = if clockwise { azimuth + angle } else { azimuth - angle };
    end + Vec2::from_angle(alpha) * radius
}

/// Mirror `point` across the perpendicular bisector of `a`-`b`.
pub fn reflect_across_bisector(a: Point, b: Point, point: Point) -> Point {
    let axis = b - a;
    let len = axis.hypot();
    if len < f64::EPSILON {
        return point;
    }
    let dir = axis / len;
    let offset = (point - mid(a, b)).dot(dir);
    point - dir * (2.0 * offset)
}

fn factorial(n: usize) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// Binomial coefficient `C(n, k)` as a float.
pub fn binomial_factor(n: usize, k: usize) -> f64 {
    factorial(n) / (factorial(k) * factorial(n - k))
}

/// Sample the Bézier curve whose control polygon is `points`.
///
/// Fewer than three points are returned unchanged. The last control point is
/// appended so the curve always ends exactly on it.
pub fn bezier_points(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let n = points.len() - 1;
    let samples = (1.0 / BEZIER_STEP).round() as usize;
    let factors: Vec<f64> = (0..=n).map(|k| binomial_factor(n, k)).collect();

    let mut out = Vec::with_capacity(samples + 1);
    for step in 0..samples {
        let t = step as f64 * BEZIER_STEP;
        let mut acc = Vec2::ZERO;
        for (k, p) in points.iter().enumerate() {
            let weight = factors[k] * t.powi(k as i32) * (1.0 - t).powi((n - k) as i32);
            acc += p.to_vec2() * weight;
        }
        out.push(acc.to_point());
    }
    out.push(points[n]);
    out
}

/// Basis weight `k` (0..=2) of the uniform quadratic B-spline at `u`.
pub fn quadratic_bspline_factor(k: usize, u: f64) -> f64 {
    match k {
        0 => (u - 1.0).powi(2) / 2.0,
        1 => (-2.0 * u.powi(2) + 2.0 * u + 1.0) / 2.0,
        2 => u.powi(2) / 2.0,
        _ => 0.0,
    }
}

/// Smooth a polyline with a sliding three-point quadratic B-spline.
///
/// The first and last input points are kept as the curve's end points.
pub fn quadratic_bspline_points(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let samples = (1.0 / BSPLINE_STEP).round() as usize;
    let windows = points.len() - 2;

    let mut out = Vec::with_capacity(windows * samples + 2);
    out.push(points[0]);
    for window in points.windows(3) {
        for step in 0..samples {
            let u = step as f64 * BSPLINE_STEP;
            let mut acc = Vec2::ZERO;
            for (k, p) in window.iter().enumerate() {
                acc += p.to_vec2() * quadratic_bspline_factor(k, u);
            }
            out.push(acc.to_point());
        }
    }
    out.push(points[points.len() - 1]);
    out
}
