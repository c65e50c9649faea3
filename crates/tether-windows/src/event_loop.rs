//! Engine thread plumbing.
//!
//! Companion windows and WinEvent hooks belong to the thread that
//! creates them, so everything that touches them runs on one dedicated
//! thread with its own message queue. Other threads talk to it by
//! queueing work and posting [`WM_WAKE`].

use std::sync::mpsc;
use std::thread;

use tether_core::WindowResult;
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    MSG, PM_NOREMOVE, PeekMessageW, PostThreadMessageW, WM_APP, WM_QUIT, WM_USER,
};

#[path = "event_loop_message_pump.rs"]
mod message_pump;

pub use message_pump::{pump_messages, wait_for_messages};

/// Thread message telling the loop that queued work is waiting.
pub const WM_WAKE: u32 = WM_APP + 1;

/// Starts `body` on a new thread that owns a Win32 message queue.
///
/// Returns once the queue exists, so [`EventLoopHandle::wake`] and
/// [`EventLoopHandle::stop`] can't be lost. `body` is expected to call
/// [`pump_messages`] regularly and return when it reports `WM_QUIT`.
pub fn start<F>(body: F) -> WindowResult<EventLoopHandle>
where
    F: FnOnce() + Send + 'static,
{
    let (ready_tx, ready_rx) = mpsc::channel::<u32>();

    let handle = thread::spawn(move || {
        // SAFETY: both calls only touch the current thread's state.
        // PeekMessageW forces the message queue into existence.
        let thread_id = unsafe {
            let mut msg = MSG::default();
            let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);
            GetCurrentThreadId()
        };

        if ready_tx.send(thread_id).is_err() {
            return;
        }

        body();
    });

    let thread_id = ready_rx
        .recv()
        .map_err(|_| -> Box<dyn std::error::Error> {
            "event loop thread exited unexpectedly".into()
        })?;

    Ok(EventLoopHandle { thread_id, handle })
}

/// Handle for controlling the event loop from another thread.
pub struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Interrupts the loop's wait so it drains its queues.
    pub fn wake(&self) -> bool {
        // SAFETY: posting to a thread id is safe; it fails if the thread
        // has exited.
        unsafe { PostThreadMessageW(self.thread_id, WM_WAKE, WPARAM(0), LPARAM(0)).is_ok() }
    }

    /// Signals the event loop to stop and waits for the thread to finish.
    pub fn stop(self) {
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}
