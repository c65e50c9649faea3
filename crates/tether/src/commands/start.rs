use std::os::windows::process::CommandExt;
use std::process::{Command, Stdio};

use tether_core::pid::{PidFile, PidStatus};

/// Windows process creation flags for launching a fully detached daemon.
///
/// `CREATE_NEW_PROCESS_GROUP` (0x200): the daemon gets its own process
/// group, so Ctrl+C in the CLI terminal won't kill it.
///
/// `CREATE_NO_WINDOW` (0x08000000): the daemon doesn't get a console
/// window and doesn't inherit the parent's console handles.
const DETACH_FLAGS: u32 = 0x08000000 | 0x00000200;

pub fn execute() {
    if tether_windows::ipc::is_daemon_running() {
        println!("Tether is already running.");
        return;
    }

    // A stale PID file from an unclean shutdown is cleared by the check.
    if let Ok(file) = PidFile::locate()
        && let PidStatus::Alive(pid) = file.status(tether_windows::process::is_process_alive)
    {
        println!("Tether process exists (PID: {pid}) but is not responding.");
        println!("Run 'tether stop' to end it.");
        return;
    }

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            eprintln!("Error: could not locate the tether executable: {e}");
            std::process::exit(1);
        }
    };

    // Re-run ourselves with the hidden `daemon` subcommand.
    let child = Command::new(exe)
        .arg("daemon")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .creation_flags(DETACH_FLAGS)
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(e) => {
            eprintln!("Error: failed to start daemon: {e}");
            std::process::exit(1);
        }
    };

    let pid = child.id();

    // Acknowledge the child without blocking; the daemon outlives us.
    let _ = child.try_wait();

    print_banner(pid);
}

fn print_banner(pid: u32) {
    let d = "\x1b[90m"; // Dim gray: labels
    let w = "\x1b[1;97m"; // Bold bright white: values
    let r = "\x1b[0m"; // Reset

    let config = tether_core::config::load();
    let layout = tether_core::config::load_layout();
    let target = layout
        .as_ref()
        .map(|l| l.process_name.clone())
        .unwrap_or(config.target.process_name)
        .unwrap_or_else(|| "none (run 'tether target <name>')".into());

    super::banner::print_logo();
    println!();
    println!("  {d}Config{r}   ~/.config/tether/");
    println!("  {d}Daemon{r}   Started (PID: {w}{pid}{r})");
    println!("  {d}Target{r}   {w}{target}{r}");
    println!();
}
