//! Shape kinds and their authoring capabilities.

use crate::geo::GeoPoint;
use crate::geometry::{self, GeometryResult, Outline};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::params::ShapeParameters;

/// Every symbol the engine can author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Point,
    Billboard,
    Label,
    Model,
    Polyline,
    Polygon,
    Rectangle,
    Circle,
    Wall,
    Stroke,
    StraightArrow,
    AttackArrow,
    PincerArrow,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 13] = [
        ShapeKind::Point,
        ShapeKind::Billboard,
        ShapeKind::Label,
        ShapeKind::Model,
        ShapeKind::Polyline,
        ShapeKind::Polygon,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Wall,
        ShapeKind::Stroke,
        ShapeKind::StraightArrow,
        ShapeKind::AttackArrow,
        ShapeKind::PincerArrow,
    ];

    /// Human-readable name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Point => "Point",
            ShapeKind::Billboard => "Billboard",
            ShapeKind::Label => "Label",
            ShapeKind::Model => "Model",
            ShapeKind::Polyline => "Polyline",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Wall => "Wall",
            ShapeKind::Stroke => "Stroke",
            ShapeKind::StraightArrow => "Straight arrow",
            ShapeKind::AttackArrow => "Attack arrow",
            ShapeKind::PincerArrow => "Pincer arrow",
        }
    }

    /// Single-position symbols report `position` in events instead of `positions`.
    pub fn is_single_point(&self) -> bool {
        matches!(
            self,
            ShapeKind::Point | ShapeKind::Billboard | ShapeKind::Label | ShapeKind::Model
        )
    }

    /// Capability record driving the generic draw/edit sessions.
    pub fn spec(&self) -> ShapeSpec {
        use FinishTrigger::*;

        let (min_points, max_points, finish) = match self {
            ShapeKind::Point | ShapeKind::Billboard | ShapeKind::Label | ShapeKind::Model => {
                (1, None, Clicks)
            }
            ShapeKind::Polyline | ShapeKind::Wall => (2, None, SecondaryClick),
            ShapeKind::Polygon => (3, None, SecondaryClick),
            ShapeKind::Rectangle | ShapeKind::Circle => (2, Some(2), Release),
            ShapeKind::Stroke => (2, None, Release),
            ShapeKind::StraightArrow => (2, Some(2), SecondaryClick),
            ShapeKind::AttackArrow => (3, None, SecondaryClick),
            ShapeKind::PincerArrow => (3, Some(5), SecondaryClick),
        };

        let editing = match self {
            ShapeKind::Stroke => EditSupport::Unsupported(
                "free-hand strokes are sampled densely and have no editable vertices",
            ),
            ShapeKind::Circle => EditSupport::Unsupported(
                "circle editing is not implemented; remove and redraw the circle instead",
            ),
            _ => EditSupport::Vertices,
        };

        ShapeSpec {
            kind: *self,
            min_points,
            max_points,
            finish,
            editing,
            geometry: geometry_fn(*self),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a draw session decides it is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishTrigger {
    /// Finish after the requested number of primary clicks (0 = until `finish()`).
    Clicks,
    /// Finish on a secondary click.
    SecondaryClick,
    /// Drag-defined: primary down starts, release finishes.
    Release,
}

/// Whether a shape kind can be vertex-edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSupport {
    Vertices,
    Unsupported(&'static str),
}

/// Outline function of a shape kind.
pub type GeometryFn = fn(&[GeoPoint], &ShapeParameters) -> GeometryResult<Outline>;

/// Per-kind capability record.
#[derive(Clone, Copy)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    /// Geometric minimum number of control points.
    pub min_points: usize,
    /// Reaching this count finishes the draw immediately.
    pub max_points: Option<usize>,
    pub finish: FinishTrigger,
    pub editing: EditSupport,
    pub geometry: GeometryFn,
}

impl fmt::Debug for ShapeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeSpec")
            .field("kind", &self.kind)
            .field("min_points", &self.min_points)
            .field("max_points", &self.max_points)
            .field("finish", &self.finish)
            .field("editing", &self.editing)
            .finish_non_exhaustive()
    }
}

fn geometry_fn(kind: ShapeKind) -> GeometryFn {
    match kind {
        ShapeKind::Point => geometry::basic::point,
        ShapeKind::Billboard => geometry::basic::billboard,
        ShapeKind::Label => geometry::basic::label,
        ShapeKind::Model => geometry::basic::model,
        ShapeKind::Polyline => geometry::basic::polyline,
        ShapeKind::Polygon => geometry::basic::polygon,
        ShapeKind::Rectangle => geometry::basic::rectangle,
        ShapeKind::Circle => geometry::basic::circle,
        ShapeKind::Wall => geometry::basic::wall,
        ShapeKind::Stroke => geometry::basic::stroke,
        ShapeKind::StraightArrow => geometry::arrow::straight_arrow,
        ShapeKind::AttackArrow => geometry::arrow::attack_arrow,
        ShapeKind::PincerArrow => geometry::pincer::pincer_arrow,
    }
}

/// Spell out small counts the way error messages read them.
pub(crate) fn count_word(n: &usize) -> String {
    match *n {
        1 => "one".to_string(),
        2 => "two".to_string(),
        3 => "three".to_string(),
        4 => "four".to_string(),
        5 => "five".to_string(),
        n => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_points() {
        assert_eq!(ShapeKind::Polyline.spec().min_points, 2);
        assert_eq!(ShapeKind::Wall.spec().min_points, 2);
        assert_eq!(ShapeKind::Polygon.spec().min_points, 3);
        assert_eq!(ShapeKind::PincerArrow.spec().min_points, 3);
        assert_eq!(ShapeKind::AttackArrow.spec().min_points, 3);
        assert_eq!(ShapeKind::StraightArrow.spec().min_points, 2);
        assert_eq!(ShapeKind::StraightArrow.spec().max_points, Some(2));
    }

    #[test]
    fn test_edit_support() {
        assert!(matches!(ShapeKind::Stroke.spec().editing, EditSupport::Unsupported(_)));
        assert!(matches!(ShapeKind::Circle.spec().editing, EditSupport::Unsupported(_)));
        assert_eq!(ShapeKind::Polygon.spec().editing, EditSupport::Vertices);
    }

    #[test]
    fn test_single_point_kinds() {
        let single: Vec<_> = ShapeKind::ALL.iter().filter(|k| k.is_single_point()).collect();
        assert_eq!(single.len(), 4);
    }

    #[test]
    fn test_serialized_name() {
        let json = serde_json::to_string(&ShapeKind::PincerArrow).unwrap();
        assert_eq!(json, "\"pincer_arrow\"");
    }

    #[test]
    fn test_count_word() {
        assert_eq!(count_word(&3), "three");
        assert_eq!(count_word(&12), "12");
    }
}
