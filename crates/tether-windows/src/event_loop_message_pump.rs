use std::time::Duration;

use windows::Win32::System::Threading::INFINITE;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, MSG, MsgWaitForMultipleObjects, PM_REMOVE, PeekMessageW, QS_ALLINPUT,
    TranslateMessage, WM_QUIT,
};

use super::WM_WAKE;

/// Blocks until a message arrives or `timeout` elapses.
///
/// `None` waits indefinitely.
pub fn wait_for_messages(timeout: Option<Duration>) {
    let millis = match timeout {
        // Round up so a deadline is never reported early.
        Some(t) => u32::try_from(t.as_nanos().div_ceil(1_000_000)).unwrap_or(INFINITE - 1),
        None => INFINITE,
    };

    // SAFETY: no handles are passed; the call only waits on this
    // thread's message queue.
    unsafe {
        let _ = MsgWaitForMultipleObjects(None, false, millis, QS_ALLINPUT);
    }
}

/// Dispatches every queued message without blocking.
///
/// WinEvent callbacks and companion window procedures run from here.
/// Returns `false` once `WM_QUIT` has been received.
pub fn pump_messages() -> bool {
    let mut msg = MSG::default();

    while unsafe { PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() } {
        if msg.message == WM_QUIT {
            return false;
        }
        // Wake-ups carry no payload; the caller drains its queues next.
        if msg.message == WM_WAKE && msg.hwnd.is_invalid() {
            continue;
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    true
}
