use atende_domain::config::Config;

#[test]
fn default_port_matches_hosted_deploy() {
    let config = Config::default();
    assert_eq!(config.server.port, 10000);
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
fn full_document_parses_with_partial_sections() {
    let toml_str = r#"
[server]
port = 9000

[transport]
max_reconnect_attempts = 2

[sessions]
warning_threshold_ms = 60000
termination_threshold_ms = 120000
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.transport.max_reconnect_attempts, 2);
    assert_eq!(config.sessions.warning_threshold_ms, 60_000);
    // Sections and fields not present fall back to defaults.
    assert_eq!(config.transport.reconnect_interval_ms, 15_000);
    assert_eq!(config.menu.options.len(), 5);
}

#[test]
fn default_thresholds_are_five_and_ten_minutes() {
    let config = Config::default();
    assert_eq!(config.sessions.warning_threshold_ms, 300_000);
    assert_eq!(config.sessions.termination_threshold_ms, 600_000);
}

#[test]
fn default_document_round_trips_through_toml() {
    let config = Config::default();
    let serialized = toml::to_string(&config).unwrap();
    let reparsed: Config = toml::from_str(&serialized).unwrap();
    assert_eq!(reparsed.server.port, config.server.port);
    assert_eq!(reparsed.menu.triggers, config.menu.triggers);
    assert_eq!(
        reparsed.sessions.termination_threshold_ms,
        config.sessions.termination_threshold_ms
    );
}
