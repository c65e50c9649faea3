//! Starter `config.toml` written by `tether init`.

/// The commented default configuration. Every value equals the built-in
/// default, so an untouched file changes nothing.
pub fn generate_config() -> String {
    r##"# Tether configuration
# Location: ~/.config/tether/config.toml
#
# Values saved by the daemon in layout.toml (anchor, offset, size, target)
# take precedence over the ones here. Run 'tether reset-layout' to go back.

[target]
# Executable name of the application to attach to. Leave unset to start idle
# and pick a target later with 'tether target <name>'.
# process_name = "WindowsTerminal"
# Corner of the target window: "top-left", "top-right", "bottom-left", "bottom-right".
anchor = "top-right"
# Pixel adjustment applied after corner placement.
offset = { dx = 0.0, dy = 0.0 }

[companion]
# Initial companion size in pixels.
width = 200
height = 40
# Limits for interactive (Ctrl + drag) and content-driven resizing.
min_width = 120
min_height = 32
max_width = 800
max_height = 600
# Insets from the target's edges. The top inset clears the title bar.
margin_horizontal = 12
margin_top = 40
margin_bottom = 16

[engine]
# How often new target windows are looked for: "fast" (1s), "normal" (2s),
# or "efficient" (4s).
responsiveness = "normal"

[logging]
# Enable file logging to ~/.config/tether/logs/tether.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
