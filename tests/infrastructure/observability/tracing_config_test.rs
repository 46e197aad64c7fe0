use digitize::infrastructure::observability::TracingConfig;
use digitize::presentation::config::{Environment, LoggingSettings};

#[test]
fn given_default_config_when_created_then_uses_local_plain_text() {
    let config = TracingConfig::default();

    assert_eq!(config.environment, Environment::Local);
    assert!(!config.json_format);
    assert!(config.default_directive.contains("digitize=debug"));
}

#[test]
fn given_logging_settings_when_building_config_then_copies_format_and_level() {
    let logging = LoggingSettings {
        level: "warn".to_string(),
        json: true,
    };

    let config = TracingConfig::from_settings(Environment::Prod, &logging);

    assert_eq!(config.environment, Environment::Prod);
    assert!(config.json_format);
    assert_eq!(config.default_directive, "warn");
}
