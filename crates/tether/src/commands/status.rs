use tether_core::Command;
use tether_core::pid::{PidFile, PidStatus};
use tether_windows::process;

pub fn execute() {
    if tether_windows::ipc::is_daemon_running() {
        match tether_windows::ipc::send_command(&Command::Status) {
            Ok(response) => println!(
                "{}",
                response
                    .message
                    .unwrap_or_else(|| "Tether is running.".into())
            ),
            Err(_) => println!("Tether is running."),
        }
        return;
    }

    // The pipe is silent: either nothing runs or a daemon is stuck.
    let status = PidFile::locate().map(|file| file.status(process::is_process_alive));
    match status {
        Ok(PidStatus::Alive(pid)) => {
            println!("Tether process exists (PID: {pid}) but is not responding.");
        }
        Ok(PidStatus::Stale(_)) => {
            println!("Tether is not running (cleaned up stale PID file).");
        }
        Ok(PidStatus::Absent) | Err(_) => println!("Tether is not running."),
    }
}
