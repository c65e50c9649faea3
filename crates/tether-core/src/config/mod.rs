mod layout;
mod loader;
pub mod template;
mod types;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

pub use layout::Layout;
pub use loader::{
    config_dir, config_path, layout_path, load, load_layout, parse_config, save_layout,
};
pub use types::{CompanionConfig, EngineConfig, Responsiveness, TargetConfig};

/// Top-level configuration for Tether.
///
/// Loaded from `~/.config/tether/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target application and anchoring.
    pub target: TargetConfig,
    /// Companion window geometry.
    pub companion: CompanionConfig,
    /// Discovery cadence.
    pub engine: EngineConfig,
    /// File logging settings.
    pub logging: LogConfig,
}

impl Config {
    /// Clamps companion geometry and offsets to safe ranges.
    ///
    /// Keeps min <= max, pulls the initial size inside that range and
    /// replaces non-finite offsets, so a hand-edited file can't produce
    /// an invisible or off-screen companion.
    pub fn validate(&mut self) {
        let c = &mut self.companion;
        c.min_width = c.min_width.clamp(1, 4000);
        c.min_height = c.min_height.clamp(1, 4000);
        c.max_width = c.max_width.clamp(c.min_width, 8000);
        c.max_height = c.max_height.clamp(c.min_height, 8000);
        c.width = c.width.clamp(c.min_width, c.max_width);
        c.height = c.height.clamp(c.min_height, c.max_height);
        c.margin_horizontal = c.margin_horizontal.clamp(0, 500);
        c.margin_top = c.margin_top.clamp(0, 500);
        c.margin_bottom = c.margin_bottom.clamp(0, 500);

        let offset = &mut self.target.offset;
        if !offset.dx.is_finite() {
            offset.dx = 0.0;
        }
        if !offset.dy.is_finite() {
            offset.dy = 0.0;
        }

        if let Some(name) = &self.target.process_name
            && name.trim().is_empty()
        {
            self.target.process_name = None;
        }
    }
}
