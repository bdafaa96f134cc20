//! Command-line interface for the hook dispatcher.
//!
//! Hook runners usually call us with no arguments at all, so every flag
//! has a sensible default and an environment variable twin.

use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

/// Play a notification sound for an agent hook event read from stdin.
///
/// Reads one JSON object such as {"event": "stop"} from standard input.
/// "stop" plays the task-complete sound, "notification" plays the
/// attention-needed sound, anything else gets a generic beep. Always exits 0,
/// even on a bad flag: the flags are then ignored and only the HOOKBELL_*
/// environment variables are used.
#[derive(Parser, Debug, Clone)]
#[command(name = "hookbell")]
#[command(version)]
#[command(about = "Play a notification sound for agent hook events")]
pub struct Args {
    /// Directory containing task_complete.aiff and attention_needed.aiff
    #[arg(long, env = "HOOKBELL_ASSETS_DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Append-only event log
    #[arg(long, env = "HOOKBELL_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Disable the event log
    #[arg(long)]
    pub no_log: bool,

    /// Playback strategy
    #[arg(long, value_enum, default_value = "auto", env = "HOOKBELL_PLAYER")]
    pub player: PlayerChoice,

    /// Print diagnostics to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Playback strategy as chosen on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum PlayerChoice {
    /// Pick based on the host OS
    #[default]
    Auto,
    /// macOS afplay
    Afplay,
    /// PulseAudio paplay
    Paplay,
    /// Windows PowerShell SoundPlayer
    Powershell,
    /// Terminal bell only
    Bell,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            assets_dir: None,
            log_file: None,
            no_log: false,
            player: PlayerChoice::Auto,
            verbose: false,
        }
    }
}

impl Args {
    /// Parse command line arguments without ever failing the invocation.
    pub fn parse_args() -> Self {
        Self::parse_args_from(std::env::args_os())
    }

    /// `--help` and `--version` print and exit 0 as usual. Any other parse
    /// error is reported on stderr and the flags are dropped; the
    /// `HOOKBELL_*` environment still applies, so a broken hook command
    /// line still produces a notification in the right place.
    pub fn parse_args_from<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        match Args::try_parse_from(&argv) {
            Ok(args) => args,
            Err(e) if e.use_stderr() => {
                let _ = e.print();
                let bin = argv
                    .first()
                    .cloned()
                    .unwrap_or_else(|| OsString::from("hookbell"));
                Args::try_parse_from([bin]).unwrap_or_default()
            }
            Err(e) => e.exit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["hookbell"]);
        assert!(!args.no_log);
        assert!(!args.verbose);
    }

    #[test]
    fn test_player_choices() {
        let args = Args::parse_from(["hookbell", "--player", "paplay"]);
        assert_eq!(args.player, PlayerChoice::Paplay);
        let args = Args::parse_from(["hookbell", "--player", "powershell", "-v"]);
        assert_eq!(args.player, PlayerChoice::Powershell);
        assert!(args.verbose);
    }

    #[test]
    fn test_unknown_player_rejected() {
        assert!(Args::try_parse_from(["hookbell", "--player", "kazoo"]).is_err());
    }

    #[test]
    fn test_bad_flag_drops_flags_but_not_defaults() {
        let args = Args::parse_args_from(["hookbell", "--no-log", "--player", "bell", "--bogus"]);
        // Every flag is suspect once one is wrong.
        assert!(!args.no_log);
        assert!(!args.verbose);
    }
}
