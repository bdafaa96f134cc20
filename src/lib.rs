//! hookbell - notification sounds for agent hook events.
//!
//! A hook runner pipes one JSON event into the `hookbell` binary; we play a
//! sound for it and get out of the way. Failures degrade to a plainer
//! noise, never to a non-zero exit code.

pub mod app;
pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod event_log;
pub mod models;

pub use app::Dispatcher;
pub use audio::{Launcher, Player, SoundPlayer, SystemLauncher};
pub use config::HookConfig;
pub use error::HookError;
pub use event_log::EventLog;
pub use models::{Beep, Event, EventKind, IgnoreReason, Outcome, Sound};
