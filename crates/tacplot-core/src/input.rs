//! Pointer input delivered by the host viewport.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// The button that places and drags points.
    pub fn is_primary(&self) -> bool {
        *self == MouseButton::Left
    }

    /// The button that finishes multi-point draws.
    pub fn is_secondary(&self) -> bool {
        *self == MouseButton::Right
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
    Click { position: Point, button: MouseButton },
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    /// Primary click.
    pub fn click(x: f64, y: f64) -> Self {
        PointerEvent::Click {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// Secondary click.
    pub fn right_click(x: f64, y: f64) -> Self {
        PointerEvent::Click {
            position: Point::new(x, y),
            button: MouseButton::Right,
        }
    }
}

/// Tracks raw button state and synthesizes clicks.
///
/// Some hosts only deliver down/up pairs. A release that lands within
/// `click_tolerance` pixels of its press is followed by a `Click`.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Press position per held button.
    pressed: HashMap<MouseButton, Point>,
    click_tolerance: f64,
    synthesize_clicks: bool,
}

impl InputState {
    pub fn new(click_tolerance: f64, synthesize_clicks: bool) -> Self {
        Self {
            click_tolerance,
            synthesize_clicks,
            ..Default::default()
        }
    }

    /// Record an event and return what the sessions should see, in order.
    pub fn process(&mut self, event: PointerEvent) -> Vec<PointerEvent> {
        match event {
            PointerEvent::Down { position, button } => {
                self.pressed.insert(button, position);
                vec![event]
            }
            PointerEvent::Up { position, button } => {
                let start = self.pressed.remove(&button);
                let is_click = start.is_some_and(|s| s.distance(position) <= self.click_tolerance);
                if self.synthesize_clicks && is_click {
                    vec![event, PointerEvent::Click { position, button }]
                } else {
                    vec![event]
                }
            }
            _ => vec![event],
        }
    }
}
