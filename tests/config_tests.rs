use std::path::PathBuf;

use teller_read_api::config::{parse_flag, Settings};
use teller_read_api::error::AppError;
use teller_read_api::observability::{LogConfig, LogFormat};

fn build(overrides: &[(&str, &str)]) -> Result<Settings, AppError> {
    let mut builder = config::Config::builder();
    for (key, value) in overrides {
        builder = builder.set_override(*key, *value)?;
    }
    Settings::from_config(builder.build()?)
}

#[test]
fn test_full_settings_resolution() {
    let settings = build(&[
        ("feature_static_db", "true"),
        ("feature_manual_data", "True"),
        ("backend_api_token", "  abc123  "),
        ("render_external_url", "https://api.example.com"),
        ("port", "8080"),
        ("host", "127.0.0.1"),
        ("data_path", "fixtures/db.json"),
        ("log_level", "debug"),
        ("log_format", "json"),
        ("metrics_port", "9100"),
    ])
    .unwrap();

    assert!(settings.features.static_db);
    assert!(settings.features.manual_data);
    assert!(settings.features.use_backend);
    assert_eq!(settings.auth.token.as_deref(), Some("abc123"));
    assert!(settings.auth.require_auth);
    assert_eq!(settings.server.external_url, "https://api.example.com");
    assert_eq!(settings.listen_addr(), "127.0.0.1:8080");
    assert_eq!(settings.server.metrics_port, Some(9100));
    assert_eq!(settings.data.path, PathBuf::from("fixtures/db.json"));

    let log_config = LogConfig::from(&settings.logging);
    assert_eq!(log_config.level, "debug");
    assert_eq!(log_config.format, LogFormat::Json);
}

#[test]
fn test_require_auth_override_wins() {
    let settings = build(&[("backend_api_token", "abc"), ("require_auth", "FALSE")]).unwrap();
    assert!(!settings.auth.require_auth);
    assert!(settings.auth.token_configured());

    let settings = build(&[("require_auth", "yes")]).unwrap();
    assert!(!settings.auth.require_auth);
}

#[test]
fn test_empty_values_fall_back_to_defaults() {
    let settings = build(&[("port", ""), ("require_auth", ""), ("backend_api_token", "")]).unwrap();
    assert_eq!(settings.server.port, 3001);
    assert!(!settings.auth.require_auth);
    assert_eq!(settings.auth.token, None);
}

#[test]
fn test_invalid_metrics_port() {
    assert!(matches!(build(&[("metrics_port", "99999")]), Err(AppError::Config(_))));
}

#[test]
fn test_parse_flag() {
    assert!(parse_flag(Some("true")));
    assert!(parse_flag(Some("TRUE")));
    assert!(!parse_flag(Some("1")));
    assert!(!parse_flag(Some("on")));
    assert!(!parse_flag(Some("")));
    assert!(!parse_flag(None));
}
