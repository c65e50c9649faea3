use crate::config::{Config, Layout, Responsiveness};
use crate::{Anchor, Margins, Offset, Size};

/// Live engine parameters.
///
/// Seeded from `config.toml`, overridden by the persisted layout, then
/// mutated by commands.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub process_name: Option<String>,
    pub path: Option<String>,
    pub anchor: Anchor,
    pub offset: Offset,
    /// Size given to newly created companions.
    pub mini_size: Size,
    pub min_size: Size,
    pub max_size: Size,
    pub margins: Margins,
    pub responsiveness: Responsiveness,
    /// Anchor restored by a layout reset.
    pub default_anchor: Anchor,
    /// Size restored by a layout reset.
    pub default_size: Size,
}

impl EngineSettings {
    /// Builds settings from a validated config and an optional saved layout.
    ///
    /// A saved layout is authoritative for the target, including an unset
    /// one: clearing the target must survive a restart.
    pub fn new(config: &Config, layout: Option<&Layout>) -> Self {
        let companion = &config.companion;
        let min_size = companion.min_size();
        let max_size = companion.max_size();
        let default_size = companion.size().clamp(min_size, max_size);

        let mut settings = Self {
            process_name: config.target.process_name.clone(),
            path: config.target.path.clone(),
            anchor: config.target.anchor,
            offset: config.target.offset,
            mini_size: default_size,
            min_size,
            max_size,
            margins: companion.margins(),
            responsiveness: config.engine.responsiveness,
            default_anchor: config.target.anchor,
            default_size,
        };

        if let Some(layout) = layout {
            settings.process_name = layout
                .process_name
                .clone()
                .filter(|name| !name.trim().is_empty());
            settings.path = layout.path.clone();
            settings.anchor = layout.anchor;
            settings.offset = sanitize_offset(layout.offset);
            settings.mini_size = layout.size().clamp(min_size, max_size);
            settings.responsiveness = layout.responsiveness;
        }

        settings
    }

    /// Clamps a requested companion size into the configured limits.
    pub fn clamp_size(&self, size: Size) -> Size {
        size.clamp(self.min_size, self.max_size)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        let mut config = Config::default();
        config.validate();
        Self::new(&config, None)
    }
}

/// Replaces non-finite offset components with zero.
pub(super) fn sanitize_offset(offset: Offset) -> Offset {
    let fix = |v: f64| if v.is_finite() { v } else { 0.0 };
    Offset::new(fix(offset.dx), fix(offset.dy))
}
