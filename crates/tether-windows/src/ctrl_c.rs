//! Ctrl+C signal handler using `SetConsoleCtrlHandler`.

use std::sync::OnceLock;
use std::sync::mpsc::Sender;

use tether_core::WindowResult;
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};

/// Written once by `set_handler`, read by the callback.
static SENDER: OnceLock<Sender<()>> = OnceLock::new();

/// Registers a handler that sends `()` on `tx` for Ctrl+C and Ctrl+Break.
///
/// Only one handler can be registered per process.
pub fn set_handler(tx: Sender<()>) -> WindowResult<()> {
    SENDER
        .set(tx)
        .map_err(|_| "Ctrl+C handler already registered")?;

    // SAFETY: `handler` is a plain function that only reads SENDER.
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }?;
    Ok(())
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if (ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT)
        && let Some(tx) = SENDER.get()
    {
        let _ = tx.send(());
        return windows::core::BOOL(1);
    }
    windows::core::BOOL(0)
}
