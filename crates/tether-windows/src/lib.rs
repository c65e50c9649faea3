//! Win32 backend for Tether.
//!
//! Everything here is Windows-only; on other targets the crate is empty
//! so the workspace still builds and the portable core can be tested.
#![cfg(windows)]

/// Companion overlay window.
pub mod companion;

/// Ctrl+C handling for console runs.
pub mod ctrl_c;

/// Daemon main loop.
pub mod daemon;

/// `Desktop` implementation used by the engine.
pub mod desktop;

/// Win32 window enumeration and target discovery.
pub mod enumerate;

/// WinEvent translation.
pub mod event;

/// Engine thread and message pump.
pub mod event_loop;

/// Visible frame bounds.
pub mod frame;

/// IPC via Named Pipes.
pub mod ipc;

/// Process utilities (alive check, executable path).
pub mod process;

/// WinEvent hook registration.
pub mod watcher;

/// Window type wrapping a Win32 `HWND`.
pub mod window;

pub use desktop::Win32Desktop;
pub use enumerate::{enumerate_windows, find_target_windows};
pub use window::Window;
