use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::Anchor;
use crate::config::Responsiveness;

/// The named pipe path used for IPC between CLI and daemon.
pub const PIPE_NAME: &str = r"\\.\pipe\tether";

/// A command sent from the CLI to the daemon.
///
/// These are serialized as JSON and sent over the named pipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    /// Request the daemon to stop.
    Stop,
    /// Request the daemon's current status.
    Status,
    /// Attach to windows of `process_name`, replacing any previous target.
    /// Keeps the current anchor when `anchor` is omitted.
    SetTarget {
        process_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        anchor: Option<Anchor>,
    },
    /// Stop tracking entirely.
    ClearTarget,
    /// Release current attachments and look for the target again.
    Detach,
    /// Scan immediately if nothing is attached.
    Reattach,
    SetAnchor { anchor: Anchor },
    SetOffset { dx: f64, dy: f64 },
    GetOffset,
    /// Restore default anchor, offset and size.
    ResetLayout,
    SetResponsiveness { preset: Responsiveness },
    /// Content-driven companion resize.
    SetMiniSize { width: i32, height: i32 },
    GetState,
}

/// A response sent from the daemon back to the CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    /// Whether the command succeeded.
    pub status: ResponseStatus,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optional structured payload (attach state, offset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Status of a daemon response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

impl Response {
    /// Creates a successful response with no message.
    pub fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: None,
            data: None,
        }
    }

    /// Creates a successful response with a message.
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    /// Creates a successful response carrying a serializable payload.
    pub fn ok_with_data(data: &impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                data: Some(value),
                ..Self::ok()
            },
            Err(e) => Self::error(format!("failed to encode response: {e}")),
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }

    /// Decodes the payload of a successful response.
    ///
    /// Error responses yield their message; a missing or mismatched
    /// payload is an error too.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, String> {
        if !self.is_ok() {
            return Err(self.message.unwrap_or_else(|| "unknown error".into()));
        }
        let data = self.data.ok_or("response carries no data")?;
        serde_json::from_value(data).map_err(|e| format!("unexpected response data: {e}"))
    }
}
