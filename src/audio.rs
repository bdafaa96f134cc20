//! Sound playback through whatever the host has lying around.
//!
//! Each step that fails falls through to something dumber: a bundled asset,
//! then a system sound, then the BEL character (\x07).

use crate::models::{Beep, Outcome, Sound};
use log::{debug, warn};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const MACOS_SYSTEM_SOUND: &str = "/System/Library/Sounds/Ping.aiff";
const LINUX_SYSTEM_SOUND: &str = "/usr/share/sounds/alsa/Front_Left.wav";

/// Playback strategy, picked once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    /// macOS `afplay`
    Afplay,
    /// PulseAudio `paplay`
    Paplay,
    /// Windows `Media.SoundPlayer` via PowerShell
    PowerShell,
    /// Terminal bell only
    Bell,
}

impl Player {
    /// Pick the strategy for the host platform.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Player::Afplay
        } else if cfg!(target_os = "linux") {
            Player::Paplay
        } else if cfg!(target_os = "windows") {
            Player::PowerShell
        } else {
            Player::Bell
        }
    }

    /// Program and arguments that play `path`, or `None` for bell-only.
    pub fn command_for(&self, path: &Path) -> Option<(&'static str, Vec<OsString>)> {
        match self {
            Player::Afplay => Some(("afplay", vec![path.as_os_str().to_owned()])),
            Player::Paplay => Some(("paplay", vec![path.as_os_str().to_owned()])),
            Player::PowerShell => Some((
                "powershell",
                vec![
                    OsString::from("-c"),
                    OsString::from(format!(
                        "(New-Object Media.SoundPlayer '{}').PlaySync()",
                        path.display().to_string().replace('\'', "''")
                    )),
                ],
            )),
            Player::Bell => None,
        }
    }

    /// Short system sound used for the generic beep.
    pub fn system_sound(&self) -> Option<&'static Path> {
        match self {
            Player::Afplay => Some(Path::new(MACOS_SYSTEM_SOUND)),
            Player::Paplay => Some(Path::new(LINUX_SYSTEM_SOUND)),
            Player::PowerShell | Player::Bell => None,
        }
    }
}

/// Runs an external player to completion.
///
/// Only a failure to launch is an error; the exit status is not.
pub trait Launcher {
    fn launch(&self, program: &str, args: &[OsString]) -> io::Result<()>;
}

/// Launches real processes with all standard streams discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, program: &str, args: &[OsString]) -> io::Result<()> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if !status.success() {
            debug!("{} exited with {}", program, status);
        }
        Ok(())
    }
}

/// Plays named sounds from an assets directory.
pub struct SoundPlayer<L, W> {
    player: Player,
    assets_dir: PathBuf,
    launcher: L,
    bell: W,
}

impl<L: Launcher, W: Write> SoundPlayer<L, W> {
    pub fn new(player: Player, assets_dir: impl Into<PathBuf>, launcher: L, bell: W) -> Self {
        Self {
            player,
            assets_dir: assets_dir.into(),
            launcher,
            bell,
        }
    }

    /// Where `sound` is expected to live.
    pub fn asset_path(&self, sound: Sound) -> PathBuf {
        self.assets_dir.join(sound.file_name())
    }

    /// Play a bundled sound, degrading to the generic beep on any failure.
    pub fn play(&mut self, sound: Sound) -> Outcome {
        let path = self.asset_path(sound);
        if !path.exists() {
            debug!("sound asset {} not found", path.display());
            return Outcome::FellBackToBeep(self.beep());
        }

        let Some((program, args)) = self.player.command_for(&path) else {
            return Outcome::FellBackToBeep(self.ring_bell());
        };

        match self.launcher.launch(program, &args) {
            Ok(()) => Outcome::Played(path),
            Err(e) => {
                debug!("{} failed to launch: {}", program, e);
                Outcome::FellBackToBeep(self.beep())
            }
        }
    }

    /// Generic beep: the system sound if the strategy has one, else BEL.
    pub fn beep(&mut self) -> Beep {
        let Some(sound) = self.player.system_sound() else {
            return self.ring_bell();
        };
        let Some((program, args)) = self.player.command_for(sound) else {
            return self.ring_bell();
        };

        match self.launcher.launch(program, &args) {
            Ok(()) => Beep::SystemSound(sound.to_path_buf()),
            Err(e) => {
                debug!("{} failed to launch: {}", program, e);
                self.ring_bell()
            }
        }
    }

    fn ring_bell(&mut self) -> Beep {
        // Nowhere left to fall back to if even this fails.
        if let Err(e) = self.bell.write_all(b"\x07").and_then(|_| self.bell.flush()) {
            warn!("failed to ring terminal bell: {}", e);
        }
        Beep::Bell
    }

    /// Hand back the bell sink.
    pub fn into_bell(self) -> W {
        self.bell
    }
}
