//! Logging init: file under the XDG state dir, or stderr.
//!
//! stdout belongs to host messages in `vg serve`; [`LogSink`] has no way to
//! reach it.

use anyhow::{anyhow, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,vg_core=debug,vg_cli=debug";
const LOG_FILE_NAME: &str = "vg.log";

/// Destination for log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
}

impl LogSink {
    /// `$XDG_STATE_HOME/vg/vg.log`.
    pub fn default_file() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("vg")?;
        Ok(LogSink::File(xdg_dirs.get_state_home().join(LOG_FILE_NAME)))
    }
}

/// Writer handed out per event. A file handle that cannot be cloned
/// degrades to stderr for that event.
enum SinkWriter {
    File(fs::File),
    Stderr(io::Stderr),
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SinkWriter::File(f) => f.write(buf),
            SinkWriter::Stderr(s) => s.lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkWriter::File(f) => f.flush(),
            SinkWriter::Stderr(s) => s.lock().flush(),
        }
    }
}

struct SinkMakeWriter {
    file: Option<fs::File>,
}

impl SinkMakeWriter {
    fn open(sink: &LogSink) -> Result<Self> {
        let file = match sink {
            LogSink::File(path) => Some(open_append(path)?),
            LogSink::Stderr => None,
        };
        Ok(Self { file })
    }
}

impl<'a> MakeWriter<'a> for SinkMakeWriter {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.file
            .as_ref()
            .and_then(|f| f.try_clone().ok())
            .map(SinkWriter::File)
            .unwrap_or_else(|| SinkWriter::Stderr(io::stderr()))
    }
}

fn open_append(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    Ok(fs::OpenOptions::new().create(true).append(true).open(path)?)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing to `sink`.
pub fn init_logging_with(sink: LogSink) -> Result<()> {
    let writer = SinkMakeWriter::open(&sink)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {}", e))?;

    if let LogSink::File(path) = &sink {
        tracing::info!("vg logging initialized at {}", path.display());
    }
    Ok(())
}

/// Log to `~/.local/state/vg/vg.log`. On failure (e.g. state dir
/// unwritable) returns Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    init_logging_with(LogSink::default_file()?)
}

/// Log to stderr only. Use when init_logging() fails so the CLI doesn't crash.
pub fn init_logging_stderr() {
    if let Err(e) = init_logging_with(LogSink::Stderr) {
        eprintln!("vg: logging disabled: {:#}", e);
    }
}
