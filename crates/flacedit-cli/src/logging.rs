//! Process-wide log backend.
//!
//! Records from the `log` facade are routed through a `tracing-subscriber`
//! registry with two outputs: the console (stderr) and an append-only log
//! file. Each line carries a timestamp, the severity and the component that
//! emitted it.

use anyhow::{Context, Result};
use flacedit_core::Config;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Flushes and syncs the log file when dropped.
#[derive(Debug)]
pub struct LogGuard {
    file: Option<Arc<File>>,
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        if let Some(file) = &self.file {
            if let Err(e) = (&**file).flush().and_then(|()| file.sync_all()) {
                eprintln!("Warning: failed to flush log file: {e}");
            }
        }
    }
}

/// Writer handed to the file layer; all clones append to the same file.
struct SharedFile(Arc<File>);

impl Write for SharedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self.0).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self.0).flush()
    }
}

/// Install the global log backend. Call once, early in `main`, and keep the
/// returned guard alive until shutdown.
///
/// Console verbosity follows `RUST_LOG` (default `warn`). The file records
/// everything at or above the configured level. If the log file cannot be
/// opened, logging continues on the console only.
pub fn init(config: &Config) -> LogGuard {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(console_filter);

    let file = match open_log_file(&config.log_file) {
        Ok(file) => Some(Arc::new(file)),
        Err(e) => {
            eprintln!("Warning: {e:#}. Logging to the console only.");
            None
        }
    };

    let file_layer = file.as_ref().map(|file| {
        let file = Arc::clone(file);
        fmt::layer()
            .with_ansi(false)
            .with_writer(move || SharedFile(Arc::clone(&file)))
            .with_filter(file_filter(&config.log_level))
    });

    if let Err(e) = tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: logging already initialized: {e}");
    }

    LogGuard { file }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Build the file filter for `level`, keeping the tag library's own chatter
/// at warnings and above.
fn file_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("{},lofty=warn", level.trim())).unwrap_or_else(|e| {
        eprintln!("Warning: invalid log level {level:?} ({e}), using debug");
        EnvFilter::new("debug,lofty=warn")
    })
}
