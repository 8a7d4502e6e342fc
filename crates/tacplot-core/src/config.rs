//! Authoring settings.

use serde::{Deserialize, Serialize};

/// Tunables for pointer handling and derived geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoringConfig {
    /// Radius in screen pixels within which a vertex marker is hit.
    pub pick_tolerance: f64,
    /// Maximum press-to-release travel, in pixels, still counted as a click.
    pub click_tolerance: f64,
    /// Turn down/up pairs into clicks for hosts that do not report clicks.
    pub synthesize_clicks: bool,
    /// Rim samples for circles drawn without explicit parameters.
    pub circle_segments: usize,
}

impl Default for AuthoringConfig {
    fn default() -> Self {
        Self {
            pick_tolerance: 8.0,
            click_tolerance: 3.0,
            synthesize_clicks: false,
            circle_segments: 64,
        }
    }
}
