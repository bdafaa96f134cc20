//! Event dispatch: stdin in, one sound out.
//!
//! read -> parse -> log -> classify -> play. Nothing here ever decides the
//! exit code; that is always 0.

use crate::audio::{Launcher, SoundPlayer};
use crate::config::HookConfig;
use crate::error::HookError;
use crate::event_log::EventLog;
use crate::models::{Event, IgnoreReason, Outcome};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::io::{Read, Write};

/// Deepest array/object nesting accepted in a payload.
pub const MAX_NESTING: usize = 1000;

/// Routes one hook payload to the sound player.
pub struct Dispatcher<L, W> {
    log: Option<EventLog>,
    sounds: SoundPlayer<L, W>,
}

impl<L: Launcher, W: Write> Dispatcher<L, W> {
    /// Wire a dispatcher from configuration.
    pub fn new(config: &HookConfig, launcher: L, bell: W) -> Self {
        Self {
            log: config.log_file.as_ref().map(EventLog::new),
            sounds: SoundPlayer::new(config.player, &config.assets_dir, launcher, bell),
        }
    }

    /// The event log, if logging is enabled.
    pub fn event_log(&self) -> Option<&EventLog> {
        self.log.as_ref()
    }

    /// Handle one raw payload.
    ///
    /// Empty and malformed input are ignored without touching the log.
    /// Anything that parses is logged before it is classified.
    pub fn dispatch(&mut self, input: &str) -> Result<Outcome, HookError> {
        if input.trim().is_empty() {
            debug!("empty input, nothing to do");
            return Ok(Outcome::Ignored(IgnoreReason::EmptyInput));
        }

        if nesting_depth(input) > MAX_NESTING {
            return Err(HookError::TooDeep(MAX_NESTING));
        }

        let payload = match parse_payload(input) {
            Ok(payload) => payload,
            Err(e) => {
                debug!("ignoring malformed payload: {}", e);
                return Ok(Outcome::Ignored(IgnoreReason::MalformedJson));
            }
        };

        if let Some(log) = &self.log {
            if let Err(e) = log.append_event(&payload) {
                warn!("{}", e);
            }
        }

        let event = Event::from_value(payload)?;
        info!("received {} event ({} fields)", event.kind, event.fields.len());

        let outcome = match event.kind.sound() {
            Some(sound) => self.sounds.play(sound),
            None => Outcome::FellBackToBeep(self.sounds.beep()),
        };
        debug!("outcome: {:?}", outcome);
        Ok(outcome)
    }

    /// Read everything from `input` and dispatch it.
    pub fn run<R: Read>(&mut self, mut input: R) -> Result<Outcome, HookError> {
        let mut raw = String::new();
        input
            .read_to_string(&mut raw)
            .map_err(HookError::ReadInput)?;
        self.dispatch(&raw)
    }

    /// Best-effort record of a fault that ended an invocation.
    pub fn record_failure(&self, error: &HookError) {
        warn!("{}", error);
        if let Some(log) = &self.log {
            if let Err(e) = log.append_error(&error.to_string()) {
                warn!("{}", e);
            }
        }
    }

    /// Take back the bell sink.
    pub fn into_bell(self) -> W {
        self.sounds.into_bell()
    }
}

/// Parse a whole payload without serde_json's default recursion limit.
///
/// Callers bound the depth with [`nesting_depth`] first.
fn parse_payload(input: &str) -> serde_json::Result<Value> {
    let mut de = serde_json::Deserializer::from_str(input);
    de.disable_recursion_limit();
    let payload = Value::deserialize(&mut de)?;
    de.end()?;
    Ok(payload)
}

/// Deepest bracket nesting in `input`, ignoring brackets inside strings.
fn nesting_depth(input: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in input.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}
