//! Error types for the hook pipeline.
//!
//! None of these ever reach the caller as a non-zero exit code; they end up
//! in the event log instead.

use std::path::PathBuf;
use thiserror::Error;

/// Faults that can interrupt a single hook invocation.
#[derive(Error, Debug)]
pub enum HookError {
    /// Standard input could not be read (I/O error or non-UTF-8 bytes).
    #[error("failed to read event from stdin: {0}")]
    ReadInput(#[source] std::io::Error),

    /// The payload nests deeper than the parser will follow.
    #[error("event payload nests deeper than {0} levels")]
    TooDeep(usize),

    /// The payload parsed as JSON but is not an object.
    #[error("event payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// The event log could not be appended to.
    #[error("failed to write event log {}: {source}", .path.display())]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
