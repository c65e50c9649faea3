use std::time::Instant;

use tether_core::ipc::{Command, Response};
use tether_core::log_info;

use super::daemon_loop::Manager;

/// Applies a CLI command to the manager and builds the reply.
pub(super) fn handle_command(command: &Command, manager: &mut Manager, now: Instant) -> Response {
    match command {
        Command::Stop => {
            let count = manager.attached_count();
            log_info!("Stop command received, detaching {count} window(s)");
            Response::ok_with_message(format!("Detached from {count} window(s)"))
        }
        Command::Status => Response::ok_with_message(status_message(manager)),
        Command::SetTarget {
            process_name,
            anchor,
        } => {
            manager.set_target(process_name, *anchor, now);
            match &manager.settings().process_name {
                Some(name) => Response::ok_with_message(format!(
                    "Target set to {name}, {} window(s) attached",
                    manager.attached_count()
                )),
                None => Response::ok_with_message("Target cleared"),
            }
        }
        Command::ClearTarget => {
            manager.clear_target(now);
            Response::ok_with_message("Target cleared")
        }
        Command::Detach => {
            manager.detach(now);
            Response::ok_with_message("Detached")
        }
        Command::Reattach => {
            if manager.reattach(now) {
                Response::ok_with_message(format!(
                    "Scanned, {} window(s) attached",
                    manager.attached_count()
                ))
            } else if manager.settings().process_name.is_none() {
                Response::error("No target set")
            } else {
                Response::ok_with_message("Already attached")
            }
        }
        Command::SetAnchor { anchor } => {
            manager.set_anchor(*anchor);
            Response::ok()
        }
        Command::SetOffset { dx, dy } => {
            manager.set_offset(*dx, *dy);
            Response::ok_with_data(&manager.offset())
        }
        Command::GetOffset => Response::ok_with_data(&manager.offset()),
        Command::ResetLayout => {
            manager.reset_layout();
            Response::ok_with_message("Layout reset")
        }
        Command::SetResponsiveness { preset } => {
            manager.set_responsiveness(*preset, now);
            Response::ok()
        }
        Command::SetMiniSize { width, height } => {
            manager.set_mini_size(*width, *height, now);
            let size = manager.settings().mini_size;
            Response::ok_with_message(format!("Size set to {}x{}", size.width, size.height))
        }
        Command::GetState => Response::ok_with_data(&manager.state()),
    }
}

fn status_message(manager: &Manager) -> String {
    match &manager.settings().process_name {
        Some(name) => format!(
            "Daemon is running, {} window(s) of {name} attached",
            manager.attached_count()
        ),
        None => "Daemon is running, no target set".to_string(),
    }
}
