//! Headless harness: replay pointer scripts against an offscreen scene.

pub mod error;
pub mod replay;
pub mod script;

pub use error::{AppError, AppResult};
pub use replay::{Outcome, Replay, Report, run};
pub use script::{SceneSetup, Script, Step, load_config, load_script};
