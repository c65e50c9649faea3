use std::io::ErrorKind;
use std::path::PathBuf;

use super::{Config, Layout};
use crate::WindowResult;

/// Returns the config directory: `~/.config/tether/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("tether"))
}

/// Returns the config file path: `~/.config/tether/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Returns the persisted layout path: `~/.config/tether/layout.toml`.
pub fn layout_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("layout.toml"))
}

/// Why a file under the config directory couldn't be used.
#[derive(Debug)]
enum ReadError {
    /// Nothing there yet; defaults apply silently.
    Missing,
    /// Present but unreadable or malformed; reported, then defaults apply.
    Broken(String),
}

fn read(path: Option<PathBuf>) -> Result<(PathBuf, String), ReadError> {
    let path = path.ok_or_else(|| ReadError::Broken("could not determine home directory".into()))?;
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok((path, content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ReadError::Missing),
        Err(e) => Err(ReadError::Broken(format!("{}: {e}", path.display()))),
    }
}

fn read_config() -> Result<Config, ReadError> {
    let (path, content) = read(config_path())?;
    parse_config(&content).map_err(|e| ReadError::Broken(format!("{}: {e}", path.display())))
}

fn read_layout() -> Result<Layout, ReadError> {
    let (path, content) = read(layout_path())?;
    toml::from_str(&content).map_err(|e| ReadError::Broken(format!("{}: {e}", path.display())))
}

/// Parses and validates config file contents.
pub fn parse_config(content: &str) -> Result<Config, String> {
    let mut config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
    config.validate();
    Ok(config)
}

/// The configuration the daemon runs with.
///
/// A missing file means defaults; a broken one is reported on stderr and
/// in the log, then defaults apply too. Values are always validated.
pub fn load() -> Config {
    or_default(read_config()).unwrap_or_else(|| {
        let mut config = Config::default();
        config.validate();
        config
    })
}

/// The layout saved by a previous daemon run, if any.
pub fn load_layout() -> Option<Layout> {
    or_default(read_layout())
}

/// Writes the layout to `layout.toml`, creating the directory if needed.
pub fn save_layout(layout: &Layout) -> WindowResult<()> {
    let path = layout_path().ok_or("could not determine layout path")?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&path, toml::to_string(layout)?)?;
    Ok(())
}

fn or_default<T>(result: Result<T, ReadError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(ReadError::Missing) => None,
        Err(ReadError::Broken(msg)) => {
            crate::log_warn!("{msg}");
            eprintln!("Warning: {msg}");
            None
        }
    }
}
