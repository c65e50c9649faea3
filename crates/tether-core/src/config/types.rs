/// Reusable type definitions for Tether configuration.
///
/// Contains the target, companion and engine sections shared across
/// the configuration subsystem.
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Anchor, Margins, Offset, Size};

/// Which application to attach to, and where.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Executable name of the target (e.g. "WindowsTerminal" or "Code.exe").
    /// Nothing is attached while this is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    /// Full executable path, kept for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Corner of the target the companion is pinned to.
    pub anchor: Anchor,
    /// Pixel adjustment applied after corner placement.
    pub offset: Offset,
}

/// Companion window geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// Initial content width in pixels.
    pub width: i32,
    /// Initial content height in pixels.
    pub height: i32,
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
    /// Inset from the target's left/right edge.
    pub margin_horizontal: i32,
    /// Inset from the target's top edge (clears the title bar).
    pub margin_top: i32,
    /// Inset from the target's bottom edge.
    pub margin_bottom: i32,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        let margins = Margins::default();
        Self {
            width: 200,
            height: 40,
            min_width: 120,
            min_height: 32,
            max_width: 800,
            max_height: 600,
            margin_horizontal: margins.horizontal,
            margin_top: margins.top,
            margin_bottom: margins.bottom,
        }
    }
}

impl CompanionConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }

    pub fn margins(&self) -> Margins {
        Margins::new(self.margin_horizontal, self.margin_top, self.margin_bottom)
    }
}

/// Engine timing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub responsiveness: Responsiveness,
}

/// How eagerly new target windows are discovered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Responsiveness {
    Fast,
    #[default]
    Normal,
    Efficient,
}

impl Responsiveness {
    /// Interval between discovery scans while nothing is attached.
    pub fn scan_interval(self) -> Duration {
        match self {
            Self::Fast => Duration::from_secs(1),
            Self::Normal => Duration::from_secs(2),
            Self::Efficient => Duration::from_secs(4),
        }
    }

    /// Interval between validity sweeps over attached targets.
    pub fn alive_interval(self) -> Duration {
        match self {
            Self::Fast => Duration::from_millis(500),
            Self::Normal => Duration::from_secs(1),
            Self::Efficient => Duration::from_secs(2),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Normal => "normal",
            Self::Efficient => "efficient",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Some(Self::Fast),
            "normal" => Some(Self::Normal),
            "efficient" => Some(Self::Efficient),
            _ => None,
        }
    }
}
