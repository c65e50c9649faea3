mod commands;

use clap::{Parser, Subcommand};

use tether_core::{Anchor, Command, Responsiveness};

#[derive(Parser)]
#[command(
    name = "tether",
    version,
    about = "Pins a companion overlay to a corner of another application's window"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Start the daemon
    Start,
    /// Stop the daemon
    Stop,
    /// Show whether the daemon is running
    Status,
    /// Attach to every window of a process (e.g. "Code" or "WindowsTerminal.exe")
    Target {
        process: String,
        /// Corner to pin to; keeps the current one when omitted
        #[arg(long, value_parser = parse_anchor)]
        anchor: Option<Anchor>,
    },
    /// Stop tracking the current target
    Clear,
    /// Release current attachments; the target is picked up again on the next scan
    Detach,
    /// Scan for the target right away if nothing is attached
    Reattach,
    /// Pin companions to a corner: top-left, top-right, bottom-left, bottom-right
    Anchor {
        #[arg(value_parser = parse_anchor)]
        corner: Anchor,
    },
    /// Show the pixel offset, or set it when DX and DY are given
    Offset {
        #[arg(allow_negative_numbers = true, requires = "dy")]
        dx: Option<f64>,
        #[arg(allow_negative_numbers = true)]
        dy: Option<f64>,
    },
    /// Restore the default anchor, offset and size
    ResetLayout,
    /// How eagerly new target windows are found: fast, normal, efficient
    Responsiveness {
        #[arg(value_parser = parse_responsiveness)]
        preset: Responsiveness,
    },
    /// Resize every companion
    Size { width: i32, height: i32 },
    /// Show the current attach state
    State,
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
    /// Run the daemon (internal, not for direct use)
    #[command(hide = true)]
    Daemon,
}

#[derive(Subcommand)]
enum DebugCommands {
    /// List visible windows, optionally only those of one process
    List { process: Option<String> },
    /// Watch foreground changes and, optionally, one process's window events
    Events { process: Option<String> },
}

fn parse_anchor(s: &str) -> Result<Anchor, String> {
    Anchor::parse(s)
        .ok_or_else(|| "expected top-left, top-right, bottom-left or bottom-right".to_string())
}

fn parse_responsiveness(s: &str) -> Result<Responsiveness, String> {
    Responsiveness::parse(s).ok_or_else(|| "expected fast, normal or efficient".to_string())
}

/// The daemon command a fire-and-forget subcommand maps to.
#[cfg_attr(not(windows), allow(dead_code))]
fn ipc_command(command: &Commands) -> Option<Command> {
    let command = match command {
        Commands::Target { process, anchor } => Command::SetTarget {
            process_name: process.clone(),
            anchor: *anchor,
        },
        Commands::Clear => Command::ClearTarget,
        Commands::Detach => Command::Detach,
        Commands::Reattach => Command::Reattach,
        Commands::Anchor { corner } => Command::SetAnchor { anchor: *corner },
        Commands::Offset {
            dx: Some(dx),
            dy: Some(dy),
        } => Command::SetOffset { dx: *dx, dy: *dy },
        Commands::ResetLayout => Command::ResetLayout,
        Commands::Responsiveness { preset } => Command::SetResponsiveness { preset: *preset },
        Commands::Size { width, height } => Command::SetMiniSize {
            width: *width,
            height: *height,
        },
        _ => return None,
    };
    Some(command)
}

#[cfg(windows)]
fn run(command: Commands) {
    match command {
        Commands::Init => commands::init::execute(),
        Commands::Start => commands::start::execute(),
        Commands::Stop => commands::stop::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Daemon => commands::daemon::execute(),
        Commands::State => commands::control::show_state(),
        Commands::Offset { dx: None, .. } => commands::control::show_offset(),
        Commands::Debug { command } => match command {
            DebugCommands::List { process } => commands::debug::list::execute(process.as_deref()),
            DebugCommands::Events { process } => {
                commands::debug::events::execute(process.as_deref())
            }
        },
        other => {
            if let Some(command) = ipc_command(&other) {
                commands::control::execute(&command);
            }
        }
    }
}

#[cfg(not(windows))]
fn run(command: Commands) {
    match command {
        Commands::Init => commands::init::execute(),
        _ => {
            eprintln!("Tether only runs on Windows.");
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    run(cli.command);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["tether"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("arguments rejected").command
    }

    #[test]
    fn target_with_anchor_maps_to_set_target() {
        // Act
        let command = ipc_command(&parse(&["target", "Code", "--anchor", "bottom-left"]));

        // Assert
        assert_eq!(
            command,
            Some(Command::SetTarget {
                process_name: "Code".into(),
                anchor: Some(Anchor::BottomLeft),
            })
        );
    }

    #[test]
    fn offset_accepts_negative_values() {
        let command = ipc_command(&parse(&["offset", "-12", "4.5"]));
        assert_eq!(command, Some(Command::SetOffset { dx: -12.0, dy: 4.5 }));
    }

    #[test]
    fn bare_offset_is_a_query() {
        assert_eq!(ipc_command(&parse(&["offset"])), None);
    }

    #[test]
    fn offset_needs_both_components() {
        assert!(Cli::try_parse_from(["tether", "offset", "3"]).is_err());
    }

    #[test]
    fn unknown_anchor_is_rejected() {
        assert!(Cli::try_parse_from(["tether", "anchor", "middle"]).is_err());
    }

    #[test]
    fn responsiveness_preset_is_case_insensitive() {
        let command = ipc_command(&parse(&["responsiveness", "Efficient"]));
        assert_eq!(
            command,
            Some(Command::SetResponsiveness {
                preset: Responsiveness::Efficient
            })
        );
    }

    #[test]
    fn size_maps_to_mini_size() {
        let command = ipc_command(&parse(&["size", "320", "60"]));
        assert_eq!(
            command,
            Some(Command::SetMiniSize {
                width: 320,
                height: 60
            })
        );
    }
}
