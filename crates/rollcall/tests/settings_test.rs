use config::{Environment, Map};
use rollcall::Settings;
use rollcall_core::{ChannelId, GenericAttendingSlot, Role, RoleId};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

fn env(pairs: &[(&str, &str)]) -> Environment {
    let map: Map<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Environment::default().try_parsing(true).source(Some(map))
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn load(path: Option<&Path>, pairs: &[(&str, &str)]) -> Settings {
    Settings::load_with_env(path, env(pairs)).unwrap()
}

#[test]
fn bundled_defaults_apply() {
    let settings = load(None, &[("DISCORD_TOKEN", "token")]);

    assert_eq!(settings.reaction_trigger(), "📊");
    assert_eq!(settings.reaction_a(), "🅰️");
    assert_eq!(*settings.debounce_ms(), 5000);
    assert_eq!(*settings.utc_offset_hours(), 9);
    assert_eq!(settings.sheet1_name(), "シート1");
    assert!(!settings.roster_export());
    assert!(settings.announcements().is_empty());
    assert!(settings.validate().is_ok());
}

#[test]
fn missing_token_is_config_error() {
    let settings = load(None, &[]);
    let err = settings.validate().unwrap_err();
    let rollcall_error::RollcallErrorKind::Config(config) = err.kind() else {
        panic!("expected a configuration error, got {err}");
    };
    assert_eq!(config.key.as_deref(), Some("discord_token"));
}

#[test]
fn environment_overrides_file() {
    let file = write_config(
        r#"
        discord_token = "from-file"
        reaction_a = "111"
        debug_reactions = true
        "#,
    );
    let settings = load(
        Some(file.path()),
        &[("DISCORD_TOKEN", "from-env"), ("DEBOUNCE_MS", "1500")],
    );

    assert_eq!(settings.discord_token(), "from-env");
    assert_eq!(settings.reaction_a(), "111");
    assert!(*settings.debug_reactions());
    assert_eq!(*settings.debounce_ms(), 1500);
}

#[test]
fn missing_explicit_file_is_error() {
    let result = Settings::load_with_env(Some(Path::new("/nonexistent/rollcall.toml")), env(&[]));
    assert!(result.is_err());
}

#[test]
fn legacy_role_names_fill_unset_roles() {
    let settings = load(
        None,
        &[
            ("DISCORD_TOKEN", "token"),
            ("ROLE_IKEMO", "1001"),
            ("ROLE_ANNAI", "1002"),
            ("ROLE_URABATA", "1003"),
            ("ROLE_BACKSTAGE", "2003"),
        ],
    );

    assert_eq!(settings.role_performer(), "1001");
    assert_eq!(settings.role_guide(), "1002");
    assert_eq!(settings.role_backstage(), "2003");
    let roles = settings.role_table();
    assert_eq!(roles.id_of(Role::Performer), Some(RoleId(1001)));
    assert_eq!(roles.id_of(Role::Backstage), Some(RoleId(2003)));
}

#[test]
fn converts_to_aggregate_settings() {
    let settings = load(
        None,
        &[
            ("DISCORD_TOKEN", "token"),
            ("ROLE_PERFORMER", "1001"),
            ("ROLE_GUIDE", "not-an-id"),
            ("RESULT_THREAD_ID", "777"),
            ("REACTION_ATTENDING", " ✅, ,🙋 "),
            ("UTC_OFFSET_HOURS", "0"),
            ("GENERIC_ATTENDING_SLOT", "before_categories"),
        ],
    );
    let aggregate = settings.aggregate_settings().unwrap();

    assert_eq!(aggregate.roles().id_of(Role::Performer), Some(RoleId(1001)));
    assert_eq!(aggregate.roles().id_of(Role::Guide), None);
    assert_eq!(*aggregate.result_thread(), Some(ChannelId(777)));
    assert_eq!(aggregate.reaction_attending(), &vec!["✅".to_string(), "🙋".to_string()]);
    assert_eq!(aggregate.utc_offset().local_minus_utc(), 0);
    assert_eq!(*aggregate.debounce(), Duration::from_millis(5000));
    assert_eq!(*aggregate.attending_slot(), GenericAttendingSlot::BeforeCategories);
}

#[test]
fn out_of_range_offset_is_rejected() {
    let settings = load(None, &[("DISCORD_TOKEN", "token"), ("UTC_OFFSET_HOURS", "30")]);
    let err = settings.validate().unwrap_err();
    assert!(err.to_string().contains("utc_offset_hours out of range: 30"));
    assert!(settings.aggregate_settings().is_err());
}

#[test]
fn warnings_flag_suspicious_values() {
    let file = write_config(
        r#"
        discord_token = "token"
        spreadsheet_api_url = "https://example.com/exec"
        result_thread_id = "abc"

        [[announcements]]
        cron = "0 9 * * 1"
        channel_id = 1
        message = "ok"

        [[announcements]]
        daily = "99:00"
        channel_id = 1
        message = "bad"
        "#,
    );
    let settings = load(Some(file.path()), &[]);
    let warnings = settings.warnings();

    assert!(settings.roster_export());
    assert_eq!(settings.announcements().len(), 2);
    assert!(warnings.iter().any(|w| w.contains("result_thread_id")));
    assert!(warnings.iter().any(|w| w.contains("no role ids")));
    assert!(warnings.iter().any(|w| w.contains("announcements[1]")));
    assert!(!warnings.iter().any(|w| w.contains("announcements[0]")));
}

#[test]
fn redacted_output_masks_token() {
    let settings = load(None, &[("DISCORD_TOKEN", "super-secret")]);
    let shown = settings.redacted().unwrap();

    assert!(!shown.contains("super-secret"));
    assert!(shown.contains("********"));
    assert!(shown.contains("reaction_trigger"));
}
