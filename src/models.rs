//! Data models for hook events and their outcomes.

use crate::error::HookError;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Field carrying the event kind in hook payloads.
pub const EVENT_FIELD: &str = "event";
/// Alternate field name consulted when `event` is absent.
pub const KIND_FIELD: &str = "kind";

/// A single hook event as received on stdin.
///
/// Only the kind is interpreted; every other field (session id, timestamp,
/// whatever the caller sends) rides along untouched for the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Classified event kind
    pub kind: EventKind,
    /// The full payload, including the kind field
    pub fields: Map<String, Value>,
}

impl Event {
    /// Build an event from a parsed JSON payload.
    pub fn from_value(value: Value) -> Result<Self, HookError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => return Err(HookError::NotAnObject(json_type_name(&other))),
        };

        let kind = fields
            .get(EVENT_FIELD)
            .or_else(|| fields.get(KIND_FIELD))
            .map(|raw| match raw.as_str() {
                Some(name) => EventKind::parse(name),
                None => EventKind::Other(raw.to_string()),
            })
            .unwrap_or(EventKind::Missing);

        Ok(Self { kind, fields })
    }
}

/// Event categories the dispatcher knows how to route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// The agent finished its task
    Stop,
    /// The agent is waiting on the user
    Notification,
    /// Any other kind, including non-string values
    Other(String),
    /// No kind field at all
    Missing,
}

impl EventKind {
    /// Classify a kind string. Matching is exact and case-sensitive.
    pub fn parse(name: &str) -> Self {
        match name {
            "stop" => EventKind::Stop,
            "notification" => EventKind::Notification,
            other => EventKind::Other(other.to_string()),
        }
    }

    /// The named sound for this kind, if it has one.
    pub fn sound(&self) -> Option<Sound> {
        match self {
            EventKind::Stop => Some(Sound::TaskComplete),
            EventKind::Notification => Some(Sound::AttentionNeeded),
            EventKind::Other(_) | EventKind::Missing => None,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Stop => write!(f, "stop"),
            EventKind::Notification => write!(f, "notification"),
            EventKind::Other(name) => write!(f, "{}", name),
            EventKind::Missing => write!(f, "<missing>"),
        }
    }
}

/// Bundled sound assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Played when a task completes
    TaskComplete,
    /// Played when the user's attention is needed
    AttentionNeeded,
}

impl Sound {
    /// File name of the asset inside the assets directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Sound::TaskComplete => "task_complete.aiff",
            Sound::AttentionNeeded => "attention_needed.aiff",
        }
    }
}

/// How a generic beep was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Beep {
    /// A system-provided short sound was handed to the player
    SystemSound(PathBuf),
    /// The BEL character was written to the terminal
    Bell,
}

/// Why an invocation did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Stdin was empty or whitespace only
    EmptyInput,
    /// Stdin was not valid JSON
    MalformedJson,
}

/// Result of one hook invocation. Every variant maps to exit code 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A named asset was handed to the player
    Played(PathBuf),
    /// A generic beep was used instead of (or in place of) a named asset
    FellBackToBeep(Beep),
    /// Nothing happened
    Ignored(IgnoreReason),
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
