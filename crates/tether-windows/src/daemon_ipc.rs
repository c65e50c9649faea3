use std::ops::ControlFlow;
use std::sync::mpsc;

use tether_core::ipc::{Command, Response};
use tether_core::{WindowResult, log_debug, log_warn};

use crate::ipc::PipeServer;

use super::daemon_types::{DaemonMsg, ResponseSender};

/// Serves CLI clients one at a time on the IPC thread until a stop
/// command has been answered or the daemon stops listening.
pub(super) fn ipc_loop(tx: mpsc::Sender<DaemonMsg>) {
    let server = match PipeServer::create() {
        Ok(server) => server,
        Err(e) => {
            log_warn!("Failed to create pipe: {e}");
            return;
        }
    };

    loop {
        match serve_client(&server, &tx) {
            Ok(ControlFlow::Continue(())) => {}
            Ok(ControlFlow::Break(())) => return,
            Err(e) => log_warn!("IPC client dropped: {e}"),
        }
    }
}

/// Answers one client. Breaks after a stop, or when the daemon is gone.
fn serve_client(
    server: &PipeServer,
    tx: &mpsc::Sender<DaemonMsg>,
) -> WindowResult<ControlFlow<()>> {
    let mut client = server.accept()?;

    let command = match client.read_command() {
        Ok(command) => command,
        Err(e) => {
            client.reply(&Response::error(format!("Invalid command: {e}")))?;
            return Ok(ControlFlow::Continue(()));
        }
    };
    log_debug!("ipc <- {command:?}");

    let stop = matches!(command, Command::Stop);
    let (reply_tx, reply_rx): (ResponseSender, _) = mpsc::channel();
    if tx.send(DaemonMsg::Command(command, reply_tx)).is_err() {
        client.reply(&Response::error("daemon is shutting down"))?;
        return Ok(ControlFlow::Break(()));
    }

    let response = reply_rx
        .recv()
        .unwrap_or_else(|_| Response::error("engine stopped before answering"));
    client.reply(&response)?;

    Ok(if stop {
        ControlFlow::Break(())
    } else {
        ControlFlow::Continue(())
    })
}
