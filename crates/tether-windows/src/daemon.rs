use tether_core::pid::PidFile;
use tether_core::{WindowResult, log_warn};
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};

#[path = "daemon_ipc.rs"]
mod daemon_ipc;
#[path = "daemon_loop.rs"]
mod daemon_loop;
#[path = "daemon_loop_handlers.rs"]
mod daemon_loop_handlers;
#[path = "daemon_threads.rs"]
mod daemon_threads;
#[path = "daemon_types.rs"]
mod daemon_types;

/// Holds the PID file for the daemon's lifetime and removes it on drop,
/// including when the daemon loop fails.
struct PidGuard(PidFile);

impl PidGuard {
    fn claim() -> WindowResult<Self> {
        let file = PidFile::locate()?;
        file.write(std::process::id())?;
        Ok(Self(file))
    }
}

impl Drop for PidGuard {
    fn drop(&mut self) {
        if let Err(e) = self.0.remove() {
            log_warn!("could not remove {}: {e}", self.0.path().display());
        }
    }
}

/// Runs the Tether daemon until a stop command or Ctrl+C.
///
/// The engine thread owns the companions and WinEvent hooks; the main
/// thread only routes CLI commands to it.
pub fn run() -> WindowResult<()> {
    // Target bounds and companion rects must both be physical pixels, or
    // corner placement drifts on scaled monitors. Fails harmlessly when a
    // manifest already set it.
    // SAFETY: called once, before any window exists.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
    let _pid = PidGuard::claim()?;
    daemon_loop::daemon_loop()
}
