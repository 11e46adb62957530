use smart_mindmap::infrastructure::observability::TracingConfig;
use smart_mindmap::presentation::config::LoggingSettings;

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
    assert!(config.default_filter.contains("smart_mindmap"));
}

#[test]
fn given_logging_settings_when_building_config_then_copies_filter_and_format() {
    let logging = LoggingSettings {
        level: "warn".to_string(),
        enable_json: true,
    };

    let config = TracingConfig::from_settings("Prod", &logging);

    assert_eq!(config.environment, "Prod");
    assert!(config.json_format);
    assert_eq!(config.default_filter, "warn");
}
