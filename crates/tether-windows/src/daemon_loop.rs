use std::sync::mpsc;
use std::time::Instant;

use tether_core::ipc::Command;
use tether_core::{AttachManager, EngineSettings, WindowResult, config, log_info};

use crate::desktop::Win32Desktop;
use crate::event_loop::{pump_messages, wait_for_messages};
use crate::watcher;

use super::daemon_loop_handlers;
use super::daemon_threads;
use super::daemon_types::{DaemonMsg, DaemonObserver, EngineCommand};

/// The attachment manager as the daemon runs it.
pub(super) type Manager = AttachManager<Win32Desktop, DaemonObserver>;

/// The inner daemon loop, separated so cleanup always runs in `run()`.
pub(super) fn daemon_loop() -> WindowResult<()> {
    let config = config::load();
    if let Some(path) = tether_core::log::init(&config.logging) {
        log_info!("Logging to {}", path.display());
    }

    let layout = config::load_layout();
    let settings = EngineSettings::new(&config, layout.as_ref());

    log_info!("Daemon started (PID: {})", std::process::id());
    log_info!(
        "Config: target={}, anchor={}, size={}x{}, responsiveness={}, log_level={}",
        settings.process_name.as_deref().unwrap_or("<none>"),
        settings.anchor.as_str(),
        settings.mini_size.width,
        settings.mini_size.height,
        settings.responsiveness.as_str(),
        config.logging.level
    );

    let (tx, rx) = mpsc::channel::<DaemonMsg>();

    // The engine owns every window and hook; it runs on its own thread.
    let engine = daemon_threads::spawn_engine(settings)?;

    let ipc_thread = daemon_threads::spawn_ipc_listener(tx.clone());
    daemon_threads::spawn_interrupt_bridge(tx.clone());

    let mut stopped_by_command = false;
    while let Ok(msg) = rx.recv() {
        match msg {
            DaemonMsg::Command(command, reply_tx) => {
                let is_stop = matches!(command, Command::Stop);
                engine.send(command, reply_tx);
                if is_stop {
                    stopped_by_command = true;
                    break;
                }
            }
            DaemonMsg::Interrupt => {
                log_info!("Interrupted, shutting down");
                break;
            }
        }
    }

    engine.stop();
    drop(tx);
    // After an interrupt the listener is still blocked waiting for a
    // client, so only a stop command leaves it joinable.
    if stopped_by_command {
        let _ = ipc_thread.join();
    }

    log_info!("Daemon stopped");
    Ok(())
}

/// Body of the engine thread.
///
/// Pumps messages (which runs hook callbacks and companion window
/// procedures), feeds the resulting events and queued commands to the
/// manager, fires due timers, then sleeps until the next deadline or
/// the next message.
pub(super) fn engine_loop(settings: EngineSettings, commands: mpsc::Receiver<EngineCommand>) {
    let (event_tx, events) = mpsc::channel();
    watcher::install_sender(event_tx);

    let desktop = Win32Desktop::new(settings.min_size, settings.max_size);
    let mut manager: Manager =
        AttachManager::new(desktop, DaemonObserver::default(), settings, Instant::now());

    while pump_messages() {
        // Commands sent while a companion is dragged wait out the modal
        // size loop; answer them between its start and end events.
        manager.handle_events(events.try_iter(), Instant::now(), |manager| {
            drain_commands(manager, &commands);
        });
        drain_commands(&mut manager, &commands);

        manager.on_timers(Instant::now());

        let timeout = manager
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()));
        wait_for_messages(timeout);
    }

    // A stop request can arrive together with WM_QUIT; answer it before
    // tearing down.
    drain_commands(&mut manager, &commands);
    manager.shutdown();
}

fn drain_commands(manager: &mut Manager, commands: &mpsc::Receiver<EngineCommand>) {
    for (command, reply) in commands.try_iter() {
        let response = daemon_loop_handlers::handle_command(&command, manager, Instant::now());
        let _ = reply.send(response);
    }
}
