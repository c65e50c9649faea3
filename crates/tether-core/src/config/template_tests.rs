use super::*;
use crate::config::parse_config;

#[test]
fn template_loads_as_the_defaults() {
    // Arrange
    let mut defaults = crate::Config::default();
    defaults.validate();

    // Act
    let config = parse_config(&generate_config()).expect("template does not parse");

    // Assert
    assert_eq!(config.target.process_name, None);
    assert_eq!(config.target.anchor, defaults.target.anchor);
    assert_eq!(config.target.offset, defaults.target.offset);
    assert_eq!(config.companion.size(), defaults.companion.size());
    assert_eq!(config.companion.min_size(), defaults.companion.min_size());
    assert_eq!(config.companion.max_size(), defaults.companion.max_size());
    assert_eq!(config.companion.margins(), defaults.companion.margins());
    assert_eq!(config.engine.responsiveness, defaults.engine.responsiveness);
    assert_eq!(config.logging.enabled, defaults.logging.enabled);
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.logging.max_file_mb, defaults.logging.max_file_mb);
}

#[test]
fn template_has_one_table_per_section() {
    // Act
    let table: toml::Table = toml::from_str(&generate_config()).expect("not TOML");

    // Assert
    let mut sections: Vec<&str> = table.keys().map(String::as_str).collect();
    sections.sort_unstable();
    assert_eq!(sections, ["companion", "engine", "logging", "target"]);
}

#[test]
fn uncommenting_the_target_selects_it() {
    // Arrange
    let edited = generate_config().replace(
        "# process_name = \"WindowsTerminal\"",
        "process_name = \"WindowsTerminal\"",
    );

    // Act
    let config = parse_config(&edited).expect("edited template does not parse");

    // Assert
    assert_eq!(config.target.process_name.as_deref(), Some("WindowsTerminal"));
}
