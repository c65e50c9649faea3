use std::sync::mpsc;
use std::thread;

use tether_core::{EngineSettings, WindowResult, log_warn};

use crate::{ctrl_c, event_loop};

use super::daemon_ipc;
use super::daemon_loop;
use super::daemon_types::{DaemonMsg, Engine, EngineCommand};

/// Spawns the engine thread.
pub(super) fn spawn_engine(settings: EngineSettings) -> WindowResult<Engine> {
    let (commands, commands_rx) = mpsc::channel::<EngineCommand>();
    let event_loop = event_loop::start(move || daemon_loop::engine_loop(settings, commands_rx))?;
    Ok(Engine {
        commands,
        event_loop,
    })
}

/// Spawns the IPC listener thread.
pub(super) fn spawn_ipc_listener(tx: mpsc::Sender<DaemonMsg>) -> thread::JoinHandle<()> {
    thread::spawn(move || daemon_ipc::ipc_loop(tx))
}

/// Bridges Ctrl+C into the daemon message channel.
///
/// The bridge thread is never joined: it waits for a signal that may
/// never come.
pub(super) fn spawn_interrupt_bridge(tx: mpsc::Sender<DaemonMsg>) {
    let (stop_tx, stop_rx) = mpsc::channel();
    if let Err(e) = ctrl_c::set_handler(stop_tx) {
        log_warn!("Ctrl+C handler not installed: {e}");
        return;
    }

    thread::spawn(move || {
        if stop_rx.recv().is_ok() {
            let _ = tx.send(DaemonMsg::Interrupt);
        }
    });
}
