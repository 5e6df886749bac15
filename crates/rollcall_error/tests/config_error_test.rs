use rollcall_error::{ConfigError, RollcallError, RollcallErrorKind};

#[test]
fn keyed_error_names_the_setting() {
    let err = ConfigError::for_key("utc_offset_hours", "out of range: 30");
    assert_eq!(err.key.as_deref(), Some("utc_offset_hours"));
    assert!(err.to_string().starts_with("Configuration Error: utc_offset_hours out of range: 30"));
}

#[test]
fn unkeyed_error_has_no_key() {
    let err = ConfigError::new("Failed to build configuration");
    assert!(err.key.is_none());
    assert!(err.to_string().starts_with("Configuration Error: Failed to build configuration at line"));
}

#[test]
fn location_is_the_caller() {
    let err = ConfigError::for_key("discord_token", "is not set");
    assert!(err.file.ends_with("config_error_test.rs"));
    assert_eq!(err.line, line!() - 2);
}

#[test]
fn converts_into_top_level_error() {
    let err: RollcallError = ConfigError::for_key("discord_token", "is not set").into();
    assert!(matches!(err.kind(), RollcallErrorKind::Config(config) if config.key.as_deref() == Some("discord_token")));
}
