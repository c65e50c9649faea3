//! Commands that talk to the running daemon.

use tether_core::ipc::Response;
use tether_core::{AttachState, Command, Offset};

/// Sends `command` and prints the daemon's reply.
pub fn execute(command: &Command) {
    let response = send(command);

    if response.is_ok() {
        if let Some(msg) = response.message {
            println!("{msg}");
        }
    } else {
        eprintln!(
            "Error: {}",
            response.message.unwrap_or("unknown error".into()),
        );
        std::process::exit(1);
    }
}

/// Prints the current attach state.
pub fn show_state() {
    let state: AttachState = match send(&Command::GetState).into_data() {
        Ok(state) => state,
        Err(e) => fail(&e),
    };

    let d = "\x1b[90m"; // Dim gray: labels
    let w = "\x1b[1;97m"; // Bold bright white: values
    let r = "\x1b[0m"; // Reset

    let target = state.target_process_name.as_deref().unwrap_or("none");
    println!("  {d}Target{r}    {w}{target}{r}");
    println!("  {d}Anchor{r}    {}", state.anchor.as_str());

    match &state.target {
        Some(info) if state.attached => {
            println!("  {d}Attached{r}  {} window(s)", state.attached_count);
            println!("  {d}Window{r}    {} (PID {})", info.title, info.process_id);
            if !info.path.is_empty() {
                println!("  {d}Path{r}      {}", info.path);
            }
        }
        _ => println!("  {d}Attached{r}  no"),
    }
}

/// Prints the current offset.
pub fn show_offset() {
    match send(&Command::GetOffset).into_data::<Offset>() {
        Ok(offset) => println!("dx={} dy={}", offset.dx, offset.dy),
        Err(e) => fail(&e),
    }
}

fn send(command: &Command) -> Response {
    if !tether_windows::ipc::is_daemon_running() {
        fail("Tether is not running.");
    }

    match tether_windows::ipc::send_command(command) {
        Ok(response) => response,
        Err(e) => fail(&format!("Failed to reach the daemon: {e}")),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
