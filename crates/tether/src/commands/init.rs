use std::path::Path;

use tether_core::config;

/// Writes a commented `config.toml` to `~/.config/tether/`.
///
/// An existing file is left alone and checked instead, so running
/// `init` again tells the user what the daemon will pick up.
pub fn execute() {
    let Some(path) = config::config_path() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if path.exists() {
        describe_existing(&path);
    } else if let Err(e) = create(&path) {
        eprintln!("Error: could not write {}: {e}", path.display());
        std::process::exit(1);
    } else {
        println!("Created {}", path.display());
        println!("\nSet [target] process_name, or run 'tether target <name>' once the daemon is up.");
    }

    if let Some(layout) = config::load_layout() {
        println!(
            "Remembered layout: {} corner, {}x{}, offset ({}, {}).",
            layout.anchor.as_str(),
            layout.width,
            layout.height,
            layout.offset.dx,
            layout.offset.dy
        );
        println!("It overrides config.toml; 'tether reset-layout' clears it.");
    }
}

fn create(path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, config::template::generate_config())
}

/// Reports the target an existing config selects, or why it won't load.
fn describe_existing(path: &Path) {
    println!("Already exists: {}", path.display());

    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| config::parse_config(&content));
    match parsed {
        Ok(cfg) => match cfg.target.process_name {
            Some(name) => println!("Target: {name}"),
            None => println!("No target set."),
        },
        Err(e) => eprintln!("Error: config does not load: {e}"),
    }
}
