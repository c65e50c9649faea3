//! Daemon log file.
//!
//! Lines go to `~/.config/tether/logs/tether.log`, next to the config and
//! layout files. Once the file reaches `max_file_mb` it is moved to
//! `tether.log.1`, replacing the previous backup.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// `[logging]` section of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Off unless enabled; the daemon has no console to fall back on.
    pub enabled: bool,
    /// "debug", "info", "warn" or "error". Unknown values mean "info".
    pub level: String,
    /// Rotation threshold in megabytes. 0 disables rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn from_config(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        })
    }
}

/// Where the daemon log lives, if a home directory is known.
pub fn log_path() -> Option<PathBuf> {
    crate::config::config_dir().map(|dir| dir.join("logs").join("tether.log"))
}

/// Installs the process-wide logger. Returns the file being written.
///
/// Returns `None` when logging is disabled, the file can't be opened, or
/// a logger is already installed.
pub fn init(config: &LogConfig) -> Option<PathBuf> {
    if !config.enabled {
        return None;
    }
    let path = log_path()?;
    let logger = Logger::open(
        &path,
        Level::from_config(&config.level),
        config.max_file_mb * 1024 * 1024,
    )
    .ok()?;
    LOGGER.set(Mutex::new(logger)).ok()?;
    Some(path)
}

/// Appends one line if `level` passes the configured minimum.
///
/// A no-op until [`init`] has installed a logger.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(logger) = LOGGER.get() else {
        return;
    };
    if let Ok(mut logger) = logger.lock() {
        logger.write(level, args);
    }
}

struct Logger {
    path: PathBuf,
    file: File,
    min_level: Level,
    /// Rotation threshold in bytes; 0 never rotates.
    limit: u64,
    size: u64,
}

impl Logger {
    fn open(path: &Path, min_level: Level, limit: u64) -> io::Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = append(path)?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            path: path.to_path_buf(),
            file,
            min_level,
            limit,
            size,
        })
    }

    fn write(&mut self, level: Level, args: fmt::Arguments<'_>) {
        if level < self.min_level {
            return;
        }
        let line = format!("{} [{level}] {args}\n", clock());
        if self.file.write_all(line.as_bytes()).is_ok() {
            self.size += line.len() as u64;
        }
        if self.limit > 0 && self.size >= self.limit {
            self.rotate();
        }
    }

    fn rotate(&mut self) {
        let backup = backup_of(&self.path);
        let _ = fs::rename(&self.path, &backup);
        if let Ok(file) = append(&self.path) {
            self.file = file;
            self.size = 0;
        }
    }
}

fn append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// `tether.log` -> `tether.log.1`.
fn backup_of(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".1");
    PathBuf::from(name)
}

/// UTC wall-clock time of day with milliseconds.
fn clock() -> String {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = since_epoch.as_secs() % 86_400;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        secs / 60 % 60,
        secs % 60,
        since_epoch.subsec_millis()
    )
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}
