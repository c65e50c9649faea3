use serde::{Deserialize, Serialize};

use super::Responsiveness;
use crate::{Anchor, Offset, Size};

/// Geometry remembered across daemon restarts.
///
/// Written to `~/.config/tether/layout.toml` whenever the engine reports
/// a change. Values here take precedence over `config.toml` at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub anchor: Anchor,
    pub offset: Offset,
    pub width: i32,
    pub height: i32,
    pub responsiveness: Responsiveness,
}

impl Default for Layout {
    fn default() -> Self {
        let companion = super::CompanionConfig::default();
        Self {
            process_name: None,
            path: None,
            anchor: Anchor::default(),
            offset: Offset::default(),
            width: companion.width,
            height: companion.height,
            responsiveness: Responsiveness::default(),
        }
    }
}

impl Layout {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
