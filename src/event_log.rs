//! Append-only debug log of received events.
//!
//! Each payload is pretty-printed and followed by a blank line; errors are
//! single `Error:` lines. The file is only ever opened for appending.

use crate::error::HookError;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Handle to the event log file. Cheap; the file is opened per write.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a received payload.
    pub fn append_event(&self, payload: &Value) -> Result<(), HookError> {
        let pretty = serde_json::to_string_pretty(payload)
            .map_err(|e| self.write_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        self.append(&format!("{}\n\n", pretty))
    }

    /// Record a fault that interrupted an invocation.
    pub fn append_error(&self, message: &str) -> Result<(), HookError> {
        self.append(&format!("Error: {}\n", message))
    }

    /// Last `n` lines of the log, oldest first. A missing log has none.
    pub fn tail(&self, n: usize) -> io::Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let lines: Vec<&str> = content.lines().collect();
        let start = lines.len().saturating_sub(n);
        Ok(lines[start..].iter().map(|line| line.to_string()).collect())
    }

    fn append(&self, entry: &str) -> Result<(), HookError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;
        file.write_all(entry.as_bytes())
            .map_err(|e| self.write_error(e))
    }

    fn write_error(&self, source: io::Error) -> HookError {
        HookError::LogWrite {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_entry_format() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("hook.log"));

        log.append_event(&json!({"session_id": "s-1", "event": "stop"}))
            .unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            content,
            "{\n  \"session_id\": \"s-1\",\n  \"event\": \"stop\"\n}\n\n"
        );
    }

    #[test]
    fn test_error_entry_format() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("hook.log"));

        log.append_error("disk on fire").unwrap();

        assert_eq!(
            fs::read_to_string(log.path()).unwrap(),
            "Error: disk on fire\n"
        );
    }

    #[test]
    fn test_appends_never_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("hook.log"));

        log.append_event(&json!({"event": "stop"})).unwrap();
        let first = fs::read_to_string(log.path()).unwrap();
        log.append_event(&json!({"event": "notification"})).unwrap();
        let second = fs::read_to_string(log.path()).unwrap();

        assert!(second.len() > first.len());
        assert!(second.starts_with(&first));
    }

    #[test]
    fn test_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("nested").join("deeper").join("hook.log"));

        log.append_error("first").unwrap();

        assert!(log.path().exists());
    }

    #[test]
    fn test_unwritable_path_reports_log_write() {
        let dir = tempfile::tempdir().unwrap();
        // A directory can't be opened for appending.
        let log = EventLog::new(dir.path());

        let err = log.append_error("nope").unwrap_err();
        assert!(matches!(err, HookError::LogWrite { .. }));
    }

    #[test]
    fn test_tail() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("hook.log"));
        assert!(log.tail(10).unwrap().is_empty());

        for i in 0..12 {
            log.append_error(&format!("line {}", i)).unwrap();
        }

        let tail = log.tail(10).unwrap();
        assert_eq!(tail.len(), 10);
        assert_eq!(tail[0], "Error: line 2");
        assert_eq!(tail[9], "Error: line 11");
    }
}
