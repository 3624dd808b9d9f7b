//! StudyHub Application
//!
//! The headless application shell: configuration, recorded-session replay,
//! board persistence and PNG export on top of the core and render crates.

mod app;
mod cli;
mod config;
mod error;
mod session;
mod shortcuts;

pub use app::{App, RunOptions, RunSummary};
pub use cli::{CliArgs, USAGE};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use session::{ReplayStats, Session};
pub use shortcuts::{Shortcut, ShortcutRegistry};
