//! Parametric family settings.
//!
//! Factors are dimensionless ratios relative to the shaft length. Values above
//! the conventional ranges are accepted and simply produce odd looking (even
//! self-intersecting) symbols.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::kind::ShapeKind;

/// Two-anchor arrow built from fixed head and neck angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StraightArrowParams {
    pub tail_width_factor: f64,
    pub neck_width_factor: f64,
    pub head_width_factor: f64,
    /// Angle between the shaft and the head barbs (radians).
    pub head_angle: f64,
    /// Angle between the shaft and the neck points (radians).
    pub neck_angle: f64,
}

impl Default for StraightArrowParams {
    fn default() -> Self {
        Self {
            tail_width_factor: 0.15,
            neck_width_factor: 0.2,
            head_width_factor: 0.25,
            head_angle: PI / 8.5,
            neck_angle: PI / 13.0,
        }
    }
}

/// Multi-anchor arrow with a smoothed body and an optional swallow tail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackArrowParams {
    pub head_height_factor: f64,
    pub head_width_factor: f64,
    pub neck_height_factor: f64,
    pub neck_width_factor: f64,
    /// Caps the head height at this fraction of the tail width.
    pub head_tail_factor: f64,
    pub tail_width_factor: f64,
    pub swallow_tail_factor: f64,
    /// Cut a notch into the tail.
    pub swallow_tail: bool,
}

impl Default for AttackArrowParams {
    fn default() -> Self {
        Self {
            head_height_factor: 0.18,
            head_width_factor: 0.3,
            neck_height_factor: 0.85,
            neck_width_factor: 0.15,
            head_tail_factor: 0.8,
            tail_width_factor: 0.1,
            swallow_tail_factor: 1.0,
            swallow_tail: true,
        }
    }
}

/// Two converging arrows sharing a joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PincerArrowParams {
    pub head_height_factor: f64,
    pub head_width_factor: f64,
    pub neck_height_factor: f64,
    pub neck_width_factor: f64,
}

impl Default for PincerArrowParams {
    fn default() -> Self {
        Self {
            head_height_factor: 0.25,
            head_width_factor: 0.3,
            neck_height_factor: 0.85,
            neck_width_factor: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleParams {
    /// Number of outline samples around the rim.
    pub segments: usize,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self { segments: 64 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallParams {
    /// Extrusion above the anchors, in metres.
    pub height: f64,
}

impl Default for WallParams {
    fn default() -> Self {
        Self { height: 50.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelParams {
    pub text: String,
}

/// Settings for one draw, tagged by family.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ShapeParameters {
    /// Shapes without tunable geometry.
    #[default]
    Plain,
    StraightArrow(StraightArrowParams),
    AttackArrow(AttackArrowParams),
    PincerArrow(PincerArrowParams),
    Circle(CircleParams),
    Wall(WallParams),
    Label(LabelParams),
}

impl ShapeParameters {
    /// Documented defaults for a shape kind.
    pub fn default_for(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::StraightArrow => Self::StraightArrow(StraightArrowParams::default()),
            ShapeKind::AttackArrow => Self::AttackArrow(AttackArrowParams::default()),
            ShapeKind::PincerArrow => Self::PincerArrow(PincerArrowParams::default()),
            ShapeKind::Circle => Self::Circle(CircleParams::default()),
            ShapeKind::Wall => Self::Wall(WallParams::default()),
            ShapeKind::Label => Self::Label(LabelParams::default()),
            _ => Self::Plain,
        }
    }

    /// Replace `Plain` with the kind's defaults; keep explicit settings.
    pub fn resolve(self, kind: ShapeKind) -> Self {
        match self {
            Self::Plain => Self::default_for(kind),
            other => other,
        }
    }

    /// Check that the family matches the kind and every factor is usable.
    pub fn validate(&self, kind: ShapeKind) -> Result<(), String> {
        let expected = std::mem::discriminant(&Self::default_for(kind));
        if std::mem::discriminant(self) != expected {
            return Err(format!("{} does not accept {} parameters", kind, self.family()));
        }
        match self {
            Self::Plain | Self::Label(_) => Ok(()),
            Self::StraightArrow(p) => positive(&[
                ("tail_width_factor", p.tail_width_factor),
                ("neck_width_factor", p.neck_width_factor),
                ("head_width_factor", p.head_width_factor),
                ("head_angle", p.head_angle),
                ("neck_angle", p.neck_angle),
            ]),
            Self::AttackArrow(p) => positive(&[
                ("head_height_factor", p.head_height_factor),
                ("head_width_factor", p.head_width_factor),
                ("neck_height_factor", p.neck_height_factor),
                ("neck_width_factor", p.neck_width_factor),
                ("head_tail_factor", p.head_tail_factor),
                ("tail_width_factor", p.tail_width_factor),
                ("swallow_tail_factor", p.swallow_tail_factor),
            ]),
            Self::PincerArrow(p) => positive(&[
                ("head_height_factor", p.head_height_factor),
                ("head_width_factor", p.head_width_factor),
                ("neck_height_factor", p.neck_height_factor),
                ("neck_width_factor", p.neck_width_factor),
            ]),
            Self::Circle(p) if p.segments < 3 => {
                Err(format!("circle needs at least 3 segments, got {}", p.segments))
            }
            Self::Circle(_) => Ok(()),
            Self::Wall(p) if !p.height.is_finite() => {
                Err(format!("wall height must be finite, got {}", p.height))
            }
            Self::Wall(_) => Ok(()),
        }
    }

    pub fn family(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::StraightArrow(_) => "straight arrow",
            Self::AttackArrow(_) => "attack arrow",
            Self::PincerArrow(_) => "pincer arrow",
            Self::Circle(_) => "circle",
            Self::Wall(_) => "wall",
            Self::Label(_) => "label",
        }
    }

    pub fn straight_arrow(&self) -> StraightArrowParams {
        match self {
            Self::StraightArrow(p) => *p,
            _ => StraightArrowParams::default(),
        }
    }

    pub fn attack_arrow(&self) -> AttackArrowParams {
        match self {
            Self::AttackArrow(p) => *p,
            _ => AttackArrowParams::default(),
        }
    }

    pub fn pincer_arrow(&self) -> PincerArrowParams {
        match self {
            Self::PincerArrow(p) => *p,
            _ => PincerArrowParams::default(),
        }
    }

    pub fn circle(&self) -> CircleParams {
        match self {
            Self::Circle(p) => *p,
            _ => CircleParams::default(),
        }
    }
}

fn positive(factors: &[(&str, f64)]) -> Result<(), String> {
    for (name, value) in factors {
        if !value.is_finite() || *value <= 0.0 {
            return Err(format!("{name} must be a positive finite number, got {value}"));
        }
    }
    Ok(())
}
