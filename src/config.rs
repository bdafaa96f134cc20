//! Runtime configuration for a hook invocation.
//!
//! There is no config file: defaults sit next to the installed binary and
//! can be overridden per invocation from the command line or environment.

use crate::audio::Player;
use crate::cli::{Args, PlayerChoice};
use std::path::{Path, PathBuf};

/// Directory holding the bundled sounds, relative to the base directory.
pub const SOUNDS_DIR: &str = "sounds";
/// Event log file name, relative to the base directory.
pub const LOG_FILE: &str = "hook_handler.log";

/// Everything the dispatcher and sound player need to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Where the named sound assets live
    pub assets_dir: PathBuf,
    /// Append-only event log; `None` disables logging
    pub log_file: Option<PathBuf>,
    /// Playback strategy
    pub player: Player,
}

impl HookConfig {
    /// Defaults rooted at `base`.
    pub fn rooted_at(base: &Path) -> Self {
        Self {
            assets_dir: base.join(SOUNDS_DIR),
            log_file: Some(base.join(LOG_FILE)),
            player: Player::detect(),
        }
    }

    /// Build from parsed arguments, filling gaps with the defaults.
    pub fn from_args(args: &Args) -> Self {
        let defaults = Self::rooted_at(&default_base_dir());

        let log_file = if args.no_log {
            None
        } else {
            args.log_file.clone().or(defaults.log_file)
        };

        Self {
            assets_dir: args.assets_dir.clone().unwrap_or(defaults.assets_dir),
            log_file,
            player: args.player.resolve(),
        }
    }
}

impl PlayerChoice {
    /// Turn the CLI choice into a concrete strategy.
    pub fn resolve(self) -> Player {
        match self {
            PlayerChoice::Auto => Player::detect(),
            PlayerChoice::Afplay => Player::Afplay,
            PlayerChoice::Paplay => Player::Paplay,
            PlayerChoice::Powershell => Player::PowerShell,
            PlayerChoice::Bell => Player::Bell,
        }
    }
}

/// Directory the sounds and log live in by default: next to the binary.
pub fn default_base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| dirs::data_local_dir().map(|p| p.join("hookbell")))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_rooted_at() {
        let config = HookConfig::rooted_at(Path::new("/opt/hooks"));
        assert_eq!(config.assets_dir, PathBuf::from("/opt/hooks/sounds"));
        assert_eq!(config.log_file, Some(PathBuf::from("/opt/hooks/hook_handler.log")));
    }

    #[test]
    fn test_overrides_from_args() {
        let args = Args::parse_from([
            "hookbell",
            "--assets-dir",
            "/tmp/sounds",
            "--log-file",
            "/tmp/hook.log",
            "--player",
            "bell",
        ]);
        let config = HookConfig::from_args(&args);
        assert_eq!(config.assets_dir, PathBuf::from("/tmp/sounds"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/hook.log")));
        assert_eq!(config.player, Player::Bell);
    }

    #[test]
    fn test_no_log_wins() {
        let args = Args::parse_from(["hookbell", "--log-file", "/tmp/hook.log", "--no-log"]);
        assert_eq!(HookConfig::from_args(&args).log_file, None);
    }

    #[test]
    fn test_default_base_dir_holds_test_binary() {
        let exe = std::env::current_exe().unwrap();
        assert_eq!(default_base_dir(), exe.parent().unwrap());
    }
}
