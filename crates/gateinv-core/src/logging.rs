//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//!
//! Filter directives come from `GATEINV_LOG`, then `RUST_LOG`, then
//! [`DEFAULT_FILTER`]. Each CLI invocation runs inside a [`run_span`] so
//! lines from separate runs appended to the same file can be told apart.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::Span;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::GateinvConfig;

pub const DEFAULT_FILTER: &str = "info,gateinv=debug,gateinv_core=debug,gateinv_cli=debug";

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "GATEINV_LOG";

/// Writer that is either a file or stderr (used when file clone fails).
enum FileOrStderr {
    File(std::fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

/// First non-blank directive string, or the default.
fn filter_directives(gateinv_log: Option<String>, rust_log: Option<String>) -> String {
    [gateinv_log, rust_log]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn env_filter() -> EnvFilter {
    let directives = filter_directives(
        std::env::var(LOG_ENV_VAR).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize structured logging to `~/.local/state/gateinv/gateinv.log`.
/// Returns the log file path. On failure (e.g. log dir unwritable), returns
/// Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gateinv")?;
    let log_file_path: PathBuf = xdg_dirs.place_state_file("gateinv.log")?;
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    struct FileMakeWriter(std::fs::File);

    impl<'a> MakeWriter<'a> for FileMakeWriter {
        type Writer = FileOrStderr;

        fn make_writer(&'a self) -> Self::Writer {
            self.0
                .try_clone()
                .map(FileOrStderr::File)
                .unwrap_or(FileOrStderr::Stderr)
        }
    }

    let writer: BoxMakeWriter = BoxMakeWriter::new(FileMakeWriter(file));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;

    tracing::info!("gateinv logging initialized at {}", log_file_path.display());

    Ok(log_file_path)
}

/// Initialize logging to stderr only (no file). Use when init_logging() fails so the CLI doesn't crash.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

/// Span wrapping one CLI invocation, tagged with the settings that change
/// what a scan finds.
pub fn run_span(command: &'static str, cfg: &GateinvConfig) -> Span {
    tracing::info_span!(
        "run",
        command,
        pid = std::process::id(),
        marker = %cfg.marker,
        call = %cfg.call_name,
        max_depth = cfg.max_resolve_depth,
    )
}
