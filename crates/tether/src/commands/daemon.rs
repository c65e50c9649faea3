/// Body of the detached process that `tether start` spawns.
pub fn execute() {
    if let Err(e) = tether_windows::daemon::run() {
        tether_core::log_error!("daemon exited: {e}");
        eprintln!("tether daemon: {e}");
        std::process::exit(1);
    }
}
