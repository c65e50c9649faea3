use std::process::{Command, Output};

fn tether(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tether"))
        .args(args)
        .output()
        .expect("failed to execute tether")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_lists_the_layout_commands() {
    // Act
    let output = tether(&["--help"]);

    // Assert
    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.contains("companion overlay"));
    for command in ["target", "anchor", "offset", "size", "reset-layout"] {
        assert!(help.contains(command), "help is missing {command}");
    }
}

#[test]
fn version_names_the_binary() {
    let output = tether(&["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("tether "));
}

#[test]
fn daemon_subcommand_is_hidden() {
    // Act
    let help = stdout(&tether(&["--help"]));

    // Assert
    let listed = help
        .lines()
        .any(|line| line.trim_start().starts_with("daemon "));
    assert!(!listed);
}

#[test]
fn invalid_anchor_lists_the_corners() {
    // Act
    let output = tether(&["anchor", "center"]);

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("top-left"));
}

#[test]
fn unknown_responsiveness_is_rejected() {
    assert!(!tether(&["responsiveness", "turbo"]).status.success());
}

#[test]
fn offset_needs_both_components() {
    assert!(!tether(&["offset", "12"]).status.success());
}

#[cfg(windows)]
#[test]
fn debug_list_counts_windows() {
    // Act
    let output = tether(&["debug", "list"]);

    // Assert
    assert!(output.status.success());
    assert!(stdout(&output).contains("windows found"));
}
