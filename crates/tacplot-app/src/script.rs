//! Pointer scripts and their loader.

use std::fs;
use std::path::Path;

use kurbo::Rect;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tacplot_core::{AuthoringConfig, Camera, DrawOptions, PointerEvent, ShapeId, ShapeKind};

use crate::error::{AppError, AppResult};

/// Scene setup for the offscreen viewport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSetup {
    pub camera: Camera,
    /// Surface bounds in lon/lat; input outside is off the surface.
    pub extent: Option<Rect>,
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Draw {
        kind: ShapeKind,
        #[serde(default)]
        options: DrawOptions,
    },
    /// Edit a stored shape; without an id, the last shape finished for `kind`.
    Edit {
        kind: ShapeKind,
        #[serde(default)]
        id: Option<ShapeId>,
    },
    Pointer {
        event: PointerEvent,
    },
    Finish {
        kind: ShapeKind,
    },
    Interrupt {
        kind: ShapeKind,
    },
    Remove {
        kind: ShapeKind,
        #[serde(default)]
        id: Option<ShapeId>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub scene: SceneSetup,
    pub steps: Vec<Step>,
}

fn load_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let text = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_script(path: &Path) -> AppResult<Script> {
    let script: Script = load_json(path)?;
    log::debug!("loaded {} steps from {}", script.steps.len(), path.display());
    Ok(script)
}

/// Read a configuration file; missing fields take their defaults.
pub fn load_config(path: Option<&Path>) -> AppResult<AuthoringConfig> {
    match path {
        Some(path) => load_json(path),
        None => Ok(AuthoringConfig::default()),
    }
}
