//! The daemon's PID file.
//!
//! Lets the CLI tell a daemon that stopped answering on the pipe from one
//! that isn't running, and kill the former.

use std::fs;
use std::path::{Path, PathBuf};

use crate::WindowResult;

const PID_FILE_NAME: &str = "tether.pid";

/// What the PID file says about the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidStatus {
    /// No PID file.
    Absent,
    /// The recorded process is alive.
    Alive(u32),
    /// The recorded process is gone; the file has been removed.
    Stale(u32),
}

/// A PID file at a fixed path.
#[derive(Debug, Clone)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// The daemon's PID file: `%LOCALAPPDATA%\tether\tether.pid`, or the
    /// config directory where no local data directory exists.
    pub fn locate() -> WindowResult<Self> {
        let dir = dirs::data_local_dir()
            .map(|d| d.join("tether"))
            .or_else(crate::config::config_dir)
            .ok_or("could not determine a data directory")?;
        Ok(Self::in_dir(&dir))
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(PID_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records `pid`, creating the directory if needed.
    pub fn write(&self, pid: u32) -> WindowResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, pid.to_string())?;
        Ok(())
    }

    /// The recorded PID, or `None` without a file.
    pub fn read(&self) -> WindowResult<Option<u32>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let pid = contents
            .trim()
            .parse()
            .map_err(|e| format!("{}: invalid PID: {e}", self.path.display()))?;
        Ok(Some(pid))
    }

    /// Removes the file. A missing file is not an error.
    pub fn remove(&self) -> WindowResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Checks the recorded process with `is_alive`, removing the file
    /// when it is stale. An unreadable file counts as absent.
    pub fn status(&self, is_alive: impl Fn(u32) -> bool) -> PidStatus {
        match self.read() {
            Ok(Some(pid)) if is_alive(pid) => PidStatus::Alive(pid),
            Ok(Some(pid)) => {
                let _ = self.remove();
                PidStatus::Stale(pid)
            }
            Ok(None) | Err(_) => PidStatus::Absent,
        }
    }
}
