//! Logging setup
//!
//! stdout carries the MCP protocol stream, so logs only ever go to stderr or to
//! a file. `RUST_LOG`, when set, replaces the level picked from the flags.

use anyhow::{anyhow, Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// A shared file writer that flushes after every write.
///
/// An MCP client may kill the server at any moment, so each log line is pushed
/// to the OS before the call returns.
///
/// # Example
///
/// ```no_run
/// use std::io::Write;
/// use std::sync::{Arc, Mutex};
/// use std::fs::File;
/// use joplin_mcp_cli::logging::FileWriterGuard;
///
/// let file = File::create("joplin-mcp.log").unwrap();
/// let mut guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
/// guard.write_all(b"Log message\n").unwrap();
/// ```
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Wrap a shared file handle
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut file = self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let written = file.write(buf)?;
        file.flush()?;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .flush()
    }
}

/// Filter directive for `level`, unless `rust_log` provides one
pub fn filter_directive(level: Level, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ => level.to_string().to_lowercase(),
    }
}

fn env_filter(level: Level) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(level, rust_log.as_deref());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Install the global subscriber
///
/// With `log_file`, logs are appended to that file; if it cannot be opened the
/// logs fall back to stderr and a warning is emitted.
pub fn init(level: Level, log_file: Option<&Path>, ansi: bool) -> Result<()> {
    let opened = log_file.map(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))
    });

    match opened {
        Some(Ok(file)) => {
            let shared = Arc::new(Mutex::new(file));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_writer(move || FileWriterGuard::new(shared.clone()))
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {e}"))
        }
        Some(Err(open_error)) => {
            init_stderr(level, ansi)?;
            tracing::warn!("{:#}, logging to stderr", open_error);
            Ok(())
        }
        None => init_stderr(level, ansi),
    }
}

fn init_stderr(level: Level, ansi: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))
}
