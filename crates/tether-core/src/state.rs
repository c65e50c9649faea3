use serde::{Deserialize, Serialize};

use crate::Anchor;

/// Externally observable attachment status.
///
/// Built on demand from the manager's instance list; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachState {
    pub attached: bool,
    pub target: Option<TargetInfo>,
    pub anchor: Anchor,
    pub target_process_name: Option<String>,
    pub attached_count: usize,
}

/// Describes the target window of the representative instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInfo {
    pub process_id: u32,
    pub title: String,
    pub path: String,
}
