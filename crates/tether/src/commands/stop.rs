use tether_core::Command;
use tether_core::pid::{PidFile, PidStatus};
use tether_windows::{ipc, process};

pub fn execute() {
    // A daemon that still answers detaches every companion before exiting.
    if ipc::is_daemon_running() {
        match ipc::send_command(&Command::Stop) {
            Ok(response) if response.is_ok() => {
                let detail = response.message.unwrap_or_default();
                println!("Tether stopped. {detail}");
                return;
            }
            Ok(response) => {
                let reason = response.message.unwrap_or_else(|| "unknown error".into());
                eprintln!("Error: {reason}");
                return;
            }
            Err(e) => eprintln!("IPC failed: {e}"),
        }
    }

    // No answer on the pipe; its companions die with the process.
    let status = PidFile::locate()
        .map(|file| (file.status(process::is_process_alive), file))
        .ok();
    match status {
        Some((PidStatus::Alive(pid), file)) => {
            if !process::kill_process(pid) {
                eprintln!("Failed to kill process {pid}.");
                std::process::exit(1);
            }
            let _ = file.remove();
            println!("Tether stopped (killed unresponsive PID {pid}).");
        }
        Some((PidStatus::Stale(_), _)) => {
            println!("Tether is not running (cleaned up stale PID file).");
        }
        Some((PidStatus::Absent, _)) | None => println!("Tether is not running."),
    }
}
