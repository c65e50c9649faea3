use std::sync::mpsc;
use std::time::Duration;

use tether_core::{Window, WindowEvent};
use tether_windows::Window as WinWindow;
use tether_windows::event_loop::{pump_messages, wait_for_messages};
use tether_windows::{find_target_windows, watcher};

/// Watches foreground changes, plus location/show/hide/destroy events
/// of every window of `process`, in real time. Press Ctrl+C to stop.
pub fn execute(process: Option<&str>) {
    println!("Watching window events (press Ctrl+C to stop)...\n");

    let (tx, rx) = mpsc::channel::<WindowEvent>();
    let process = process.map(str::to_string);

    // Hooks deliver to the thread that installs them, so everything is
    // registered inside the loop thread.
    let event_loop = tether_windows::event_loop::start(move || {
        watcher::install_sender(tx);

        let mut subscriptions = Vec::new();
        match watcher::watch_foreground() {
            Ok(sub) => subscriptions.push(sub),
            Err(e) => eprintln!("Foreground hook failed: {e}"),
        }

        if let Some(name) = process {
            let targets = find_target_windows(&name).unwrap_or_default();
            if targets.is_empty() {
                eprintln!("No windows of {name} found; showing foreground changes only.");
            }
            for target in targets {
                match watcher::watch_window(target.handle, target.process_id) {
                    Ok(sub) => subscriptions.push(sub),
                    Err(e) => eprintln!("Hook for {} failed: {e}", target.handle),
                }
            }
        }

        while pump_messages() {
            wait_for_messages(None);
        }
        drop(subscriptions);
    });

    let event_loop = match event_loop {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to start event loop: {e}");
            return;
        }
    };

    // Set up Ctrl+C handler to stop the event loop cleanly.
    let (stop_tx, stop_rx) = mpsc::channel();
    if let Err(e) = tether_windows::ctrl_c::set_handler(stop_tx) {
        eprintln!("Ctrl+C handler not installed: {e}");
    }

    loop {
        if stop_rx.try_recv().is_ok() {
            break;
        }

        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                let window = WinWindow::from_handle(event.hwnd());
                let title = window.title();
                println!("{event} \"{title}\"");
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    event_loop.stop();
}
