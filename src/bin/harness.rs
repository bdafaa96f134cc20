//! hookbell-harness - fire synthetic hook events at the dispatcher.
//!
//! Handy for checking that your speakers, sound assets and log all work
//! before wiring hookbell into a real agent.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use hookbell::EventLog;
use hookbell::cli::PlayerChoice;
use hookbell::config::{LOG_FILE, default_base_dir};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

const SESSION_ID: &str = "test-session-123";
const TAIL_LINES: usize = 10;

/// Send synthetic hook events to hookbell and report how each one went.
#[derive(Parser, Debug)]
#[command(name = "hookbell-harness")]
#[command(version)]
#[command(about = "Send synthetic hook events to hookbell", long_about = None)]
struct HarnessArgs {
    /// Path to the hookbell binary (defaults to the one next to this harness)
    #[arg(long)]
    dispatcher: Option<PathBuf>,

    /// Event kinds to send, in order
    #[arg(long, value_delimiter = ',', default_value = "stop,notification,unknown")]
    events: Vec<String>,

    /// How long to wait for each invocation (e.g. 10s, 500ms)
    #[arg(long, default_value = "10s", value_parser = humantime::parse_duration)]
    timeout: Duration,

    /// Event log passed to the dispatcher and tailed afterwards
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Sound assets directory passed to the dispatcher
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Playback strategy passed to the dispatcher
    #[arg(long, value_enum)]
    player: Option<PlayerChoice>,
}

/// Payload shaped like the ones real hook runners send.
#[derive(Debug, Serialize)]
struct SyntheticEvent<'a> {
    session_id: &'a str,
    event: &'a str,
    timestamp: DateTime<Utc>,
}

#[derive(Debug)]
enum Verdict {
    Passed,
    Failed(ExitStatus),
    TimedOut,
}

fn main() -> Result<()> {
    let args = HarnessArgs::parse();

    let dispatcher = match &args.dispatcher {
        Some(path) => path.clone(),
        None => sibling_dispatcher()?,
    };
    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| default_base_dir().join(LOG_FILE));

    println!("Testing hookbell at {}", dispatcher.display());
    println!("{}", "=".repeat(50));

    let mut failures = 0;
    for kind in &args.events {
        println!("Testing {} event...", kind);
        match send_event(&dispatcher, &args, &log_file, kind) {
            Ok(Verdict::Passed) => println!("  {} event test passed", kind),
            Ok(Verdict::Failed(status)) => {
                failures += 1;
                println!("  {} event test failed: {}", kind, status);
            }
            Ok(Verdict::TimedOut) => {
                failures += 1;
                println!(
                    "  {} event test timed out after {}",
                    kind,
                    humantime::format_duration(args.timeout)
                );
            }
            Err(e) => {
                failures += 1;
                println!("  {} event test error: {:#}", kind, e);
            }
        }
    }

    println!("{}", "=".repeat(50));
    println!("Testing complete!");

    if log_file.exists() {
        println!("Log file: {}", log_file.display());
        println!("Recent log entries:");
        let tail = EventLog::new(&log_file)
            .tail(TAIL_LINES)
            .with_context(|| format!("Failed to read log file: {}", log_file.display()))?;
        for line in tail {
            println!("  {}", line);
        }
    }

    if failures > 0 {
        bail!("{} of {} event tests failed", failures, args.events.len());
    }
    Ok(())
}

/// Run the dispatcher once with a synthetic payload on stdin.
fn send_event(dispatcher: &Path, args: &HarnessArgs, log_file: &Path, kind: &str) -> Result<Verdict> {
    let payload = serde_json::to_string(&SyntheticEvent {
        session_id: SESSION_ID,
        event: kind,
        timestamp: Utc::now(),
    })
    .context("Failed to serialize synthetic event")?;

    let mut command = Command::new(dispatcher);
    command.arg("--log-file").arg(log_file);
    if let Some(assets_dir) = &args.assets_dir {
        command.arg("--assets-dir").arg(assets_dir);
    }
    if let Some(player) = args.player {
        let value = clap::ValueEnum::to_possible_value(&player)
            .context("Player choice has no command-line name")?;
        command.arg("--player").arg(value.get_name());
    }

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start {}", dispatcher.display()))?;

    {
        let mut stdin = child.stdin.take().context("Dispatcher stdin unavailable")?;
        stdin
            .write_all(payload.as_bytes())
            .context("Failed to write payload to dispatcher")?;
        // Dropping stdin closes the pipe so the dispatcher sees EOF.
    }

    match wait_with_timeout(&mut child, args.timeout)? {
        Some(status) if status.success() => Ok(Verdict::Passed),
        Some(status) => Ok(Verdict::Failed(status)),
        None => Ok(Verdict::TimedOut),
    }
}

/// Wait for `child`, killing it if it outlives `timeout`.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().context("Failed to poll dispatcher")? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

/// The `hookbell` binary installed alongside this harness.
fn sibling_dispatcher() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the harness executable")?;
    let dir = exe.parent().context("Harness executable has no parent directory")?;
    Ok(dir.join(format!("hookbell{}", std::env::consts::EXE_SUFFIX)))
}
