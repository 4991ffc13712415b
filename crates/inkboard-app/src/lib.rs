//! Inkboard Application
//!
//! Headless session runner: loads a scene, replays scripted input through
//! the engine, renders each frame to a display list and saves the result.

mod error;
mod script;
mod session;
mod shortcuts;

pub use error::{AppError, AppResult};
pub use script::{Script, ScriptStep};
pub use session::{Session, SessionReport};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};
