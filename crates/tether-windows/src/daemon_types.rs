use std::sync::mpsc;

use tether_core::config;
use tether_core::desktop::Observer;
use tether_core::ipc::{Command, Response};
use tether_core::{AttachState, Layout, log_info, log_warn};

use crate::event_loop::EventLoopHandle;

/// Internal message type for the main daemon thread.
pub(super) enum DaemonMsg {
    /// A CLI command with a callback to send the response.
    Command(Command, ResponseSender),
    /// Ctrl+C in the daemon's console.
    Interrupt,
}

/// Sends a response back to the IPC thread for the connected client.
pub(super) type ResponseSender = mpsc::Sender<Response>;

/// A command queued for the engine thread.
pub(super) type EngineCommand = (Command, ResponseSender);

/// The running engine thread and its command queue.
pub(super) struct Engine {
    pub(super) commands: mpsc::Sender<EngineCommand>,
    pub(super) event_loop: EventLoopHandle,
}

impl Engine {
    /// Queues `command`; the engine replies on `reply` itself.
    pub(super) fn send(&self, command: Command, reply: ResponseSender) {
        if self.commands.send((command, reply)).is_ok() {
            self.event_loop.wake();
        }
    }

    /// Stops the engine, which detaches everything before exiting.
    pub(super) fn stop(self) {
        self.event_loop.stop();
    }
}

/// Logs state transitions and writes the layout file.
#[derive(Default)]
pub(super) struct DaemonObserver {
    last: Option<AttachState>,
}

impl Observer for DaemonObserver {
    fn state_changed(&mut self, state: &AttachState) {
        let was_attached = self.last.as_ref().is_some_and(|s| s.attached);
        let count_changed = self
            .last
            .as_ref()
            .is_none_or(|s| s.attached_count != state.attached_count);

        if state.attached && (count_changed || !was_attached) {
            log_info!(
                "Attached to {} window(s) of {}",
                state.attached_count,
                state.target_process_name.as_deref().unwrap_or("?")
            );
        } else if !state.attached && was_attached {
            log_info!("Detached");
        }

        self.last = Some(state.clone());
    }

    fn persist(&mut self, layout: &Layout) {
        if let Err(e) = config::save_layout(layout) {
            log_warn!("Failed to save layout: {e}");
        }
    }
}
