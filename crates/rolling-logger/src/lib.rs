//! Rolling Logger
//!
//! `tracing` subscriber that writes to stderr and to a size-rotated log
//! file, keeping the most recent lines in memory for diagnostics.
//!
//! Files are `<app>.log`, `<app>.1.log`, ... `<app>.<max_files>.log`;
//! the numbered ones are older. `log` records are bridged into `tracing`.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 3;
pub const DEFAULT_RING_LINES: usize = 200;

static GLOBAL: OnceLock<LoggerHandle> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub dir: PathBuf,
    pub app_name: String,
    /// Rotate once the current file would grow past this
    pub max_bytes: u64,
    /// Rotated files kept besides the current one
    pub max_files: usize,
    pub ring_lines: usize,
}

impl LoggerConfig {
    pub fn new(dir: impl Into<PathBuf>, app_name: &str) -> Self {
        Self {
            dir: dir.into(),
            app_name: app_name.to_string(),
            max_bytes: DEFAULT_MAX_BYTES,
            max_files: DEFAULT_MAX_FILES,
            ring_lines: DEFAULT_RING_LINES,
        }
    }
}

// ============================================================================
// Rotating file
// ============================================================================

struct RollingFile {
    dir: PathBuf,
    app_name: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    fn open(config: &LoggerConfig) -> io::Result<Self> {
        fs::create_dir_all(&config.dir)?;
        let path = current_path(&config.dir, &config.app_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: config.dir.clone(),
            app_name: config.app_name.clone(),
            max_bytes: config.max_bytes,
            max_files: config.max_files,
            file,
            written,
        })
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.max_files > 0 {
            let oldest = rotated_path(&self.dir, &self.app_name, self.max_files);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for n in (1..self.max_files).rev() {
                let from = rotated_path(&self.dir, &self.app_name, n);
                if from.exists() {
                    fs::rename(&from, rotated_path(&self.dir, &self.app_name, n + 1))?;
                }
            }
            fs::rename(
                current_path(&self.dir, &self.app_name),
                rotated_path(&self.dir, &self.app_name, 1),
            )?;
        }

        let path = current_path(&self.dir, &self.app_name);
        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        self.written = 0;
        let header = format!(
            "=== {} log rotated at {} ===\n",
            self.app_name,
            chrono::Local::now().to_rfc3339()
        );
        self.file.write_all(header.as_bytes())?;
        self.written = header.len() as u64;
        Ok(())
    }

    fn write_record(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(())
    }
}

pub fn current_path(dir: &Path, app_name: &str) -> PathBuf {
    dir.join(format!("{}.log", app_name))
}

pub fn rotated_path(dir: &Path, app_name: &str, n: usize) -> PathBuf {
    dir.join(format!("{}.{}.log", app_name, n))
}

// ============================================================================
// Sink shared by the subscriber and the handle
// ============================================================================

struct SinkState {
    file: RollingFile,
    recent: VecDeque<String>,
    capacity: usize,
}

impl SinkState {
    fn remember(&mut self, buf: &[u8]) {
        if self.capacity == 0 {
            return;
        }
        for line in String::from_utf8_lossy(buf).lines() {
            if line.trim().is_empty() {
                continue;
            }
            if self.recent.len() == self.capacity {
                self.recent.pop_front();
            }
            self.recent.push_back(line.to_string());
        }
    }
}

#[derive(Clone)]
pub struct LogSink(Arc<Mutex<SinkState>>);

impl LogSink {
    pub fn open(config: &LoggerConfig) -> io::Result<Self> {
        let file = RollingFile::open(config)?;
        Ok(Self(Arc::new(Mutex::new(SinkState {
            file,
            recent: VecDeque::with_capacity(config.ring_lines),
            capacity: config.ring_lines,
        }))))
    }

    fn recent_lines(&self) -> Vec<String> {
        match self.0.lock() {
            Ok(state) => state.recent.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

pub struct SinkWriter(Arc<Mutex<SinkState>>);

impl io::Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log sink poisoned"))?;
        state.file.write_record(buf)?;
        state.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log sink poisoned"))?;
        state.file.file.flush()
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter(Arc::clone(&self.0))
    }
}

// ============================================================================
// Global logger
// ============================================================================

#[derive(Clone)]
pub struct LoggerHandle {
    sink: LogSink,
    path: PathBuf,
    app_name: String,
}

impl LoggerHandle {
    /// Most recent lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        self.sink.recent_lines()
    }

    pub fn log_path(&self) -> &Path {
        &self.path
    }
}

/// Initialize with default limits. `RUST_LOG` overrides the `info` default.
pub fn init_logger(dir: impl Into<PathBuf>, app_name: &str) -> Result<LoggerHandle, String> {
    init_with(LoggerConfig::new(dir, app_name))
}

pub fn init_with(config: LoggerConfig) -> Result<LoggerHandle, String> {
    if GLOBAL.get().is_some() {
        return Err("logger already initialized".to_string());
    }
    let sink = LogSink::open(&config)
        .map_err(|e| format!("cannot open log file in {}: {}", config.dir.display(), e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(sink.clone()),
        )
        .try_init()
        .map_err(|e| e.to_string())?;

    let handle = LoggerHandle {
        sink,
        path: current_path(&config.dir, &config.app_name),
        app_name: config.app_name,
    };
    let _ = GLOBAL.set(handle.clone());
    Ok(handle)
}

/// Handle of the installed logger, if any
pub fn handle() -> Option<&'static LoggerHandle> {
    GLOBAL.get()
}

pub fn info(message: &str) -> Result<(), String> {
    let handle = GLOBAL.get().ok_or("logger not initialized")?;
    tracing::info!(app = %handle.app_name, "{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), String> {
    let handle = GLOBAL.get().ok_or("logger not initialized")?;
    tracing::error!(app = %handle.app_name, "{}", message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn config(dir: &Path, max_bytes: u64) -> LoggerConfig {
        LoggerConfig {
            max_bytes,
            max_files: 2,
            ring_lines: 3,
            ..LoggerConfig::new(dir, "app")
        }
    }

    #[test]
    fn test_events_reach_file_and_ring() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::open(&config(dir.path(), DEFAULT_MAX_BYTES)).unwrap();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(sink.clone())
            .with_max_level(Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("board loaded");
            tracing::debug!("filtered out");
        });

        let text = fs::read_to_string(current_path(dir.path(), "app")).unwrap();
        assert!(text.contains("board loaded"));
        assert!(!text.contains("filtered out"));
        let recent = sink.recent_lines();
        assert_eq!(recent.len(), 1);
        assert!(recent[0].contains("INFO"));
    }

    #[test]
    fn test_ring_keeps_only_latest_lines() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::open(&config(dir.path(), DEFAULT_MAX_BYTES)).unwrap();
        let mut writer = sink.make_writer();
        for i in 0..5 {
            writeln!(writer, "line {}", i).unwrap();
        }
        assert_eq!(sink.recent_lines(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_rotation_shifts_files_and_drops_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::open(&config(dir.path(), 64)).unwrap();
        let mut writer = sink.make_writer();

        for i in 0..6 {
            writer.write_all(format!("{:<39}\n", format!("record {}", i)).as_bytes()).unwrap();
        }

        let current = fs::read_to_string(current_path(dir.path(), "app")).unwrap();
        assert!(current.contains("record 5"));
        assert!(current.starts_with("=== app log rotated at"));
        assert!(rotated_path(dir.path(), "app", 1).exists());
        assert!(rotated_path(dir.path(), "app", 2).exists());
        assert!(!rotated_path(dir.path(), "app", 3).exists());

        let oldest = fs::read_to_string(rotated_path(dir.path(), "app", 2)).unwrap();
        assert!(!oldest.contains("record 0"));
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), DEFAULT_MAX_BYTES);
        {
            let sink = LogSink::open(&cfg).unwrap();
            writeln!(sink.make_writer(), "first run").unwrap();
        }
        let sink = LogSink::open(&cfg).unwrap();
        writeln!(sink.make_writer(), "second run").unwrap();

        let text = fs::read_to_string(current_path(dir.path(), "app")).unwrap();
        assert_eq!(text, "first run\nsecond run\n");
    }

    #[test]
    fn test_helpers_require_init() {
        if handle().is_none() {
            assert!(info("hello").is_err());
        }
    }
}
