// Unit tests for settings load, save and validation

use crate::error::settings::SettingsError;
use crate::settings::{ARTEMIS_URL_ENV, OrionSettings, SettingKey, SettingsStore, SharedSettings};

use serial_test::serial;
use tempfile::TempDir;

fn valid_settings() -> OrionSettings {
    OrionSettings {
        version: 1,
        artemis_url: String::from("https://artemis.example"),
        project_base_dir: String::from("/home/student/ArtemisProjects"),
    }
}

fn clear_env_override() {
    // SAFETY: every test touching the environment is #[serial].
    unsafe { std::env::remove_var(ARTEMIS_URL_ENV) };
}

/// **VALUE**: Verifies a first start without a settings file works.
///
/// **WHY THIS MATTERS**: Fresh installs have no settings yet; failing here
/// would disable the plugin until the user found the file by hand.
#[test]
#[serial]
fn given_no_settings_file_when_loaded_then_defaults_returned() {
    // GIVEN: Empty settings directory and no override
    clear_env_override();
    let dir = TempDir::new().unwrap();

    // WHEN: Loading
    let settings = OrionSettings::load(dir.path()).unwrap();

    // THEN: Defaults
    assert_eq!(settings.version, 1);
    assert_eq!(settings.artemis_url, "https://artemis.cit.tum.de");
    assert!(settings.project_base_dir.ends_with("ArtemisProjects"));
}

#[test]
#[serial]
fn given_saved_settings_when_loaded_then_same_values() {
    clear_env_override();
    let dir = TempDir::new().unwrap();
    let settings = valid_settings();

    settings.save(dir.path()).unwrap();
    let loaded = OrionSettings::load(dir.path()).unwrap();

    assert_eq!(loaded, settings);
    assert!(!dir.path().join("settings.json.tmp").exists());
}

/// **BUG THIS CATCHES**: Would catch `serde(default)` being dropped, which makes
/// settings written by an older plugin unreadable.
#[test]
#[serial]
fn given_partial_settings_file_when_loaded_then_missing_fields_defaulted() {
    clear_env_override();
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"artemis_url": "http://localhost:9000"}"#,
    )
    .unwrap();

    let loaded = OrionSettings::load(dir.path()).unwrap();

    assert_eq!(loaded.artemis_url, "http://localhost:9000");
    assert_eq!(loaded.version, 1);
    assert!(!loaded.project_base_dir.is_empty());
}

#[test]
#[serial]
fn given_corrupt_settings_file_when_loaded_then_parse_error() {
    clear_env_override();
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

    let result = OrionSettings::load(dir.path());

    assert!(matches!(result, Err(SettingsError::Parse { .. })));
}

/// **VALUE**: Verifies the environment override replaces the stored origin.
#[test]
#[serial]
fn given_env_override_when_loaded_then_origin_replaced() {
    // GIVEN: Stored settings and an override
    let dir = TempDir::new().unwrap();
    valid_settings().save(dir.path()).unwrap();
    // SAFETY: serialized with every other environment test.
    unsafe { std::env::set_var(ARTEMIS_URL_ENV, "https://artemis.staging.example") };

    // WHEN: Loading
    let loaded = OrionSettings::load(dir.path());
    clear_env_override();

    // THEN: Override wins
    assert_eq!(
        loaded.unwrap().artemis_url,
        "https://artemis.staging.example"
    );
}

#[test]
#[serial]
fn given_invalid_env_override_when_loaded_then_validation_error() {
    let dir = TempDir::new().unwrap();
    // SAFETY: serialized with every other environment test.
    unsafe { std::env::set_var(ARTEMIS_URL_ENV, "not a url") };

    let loaded = OrionSettings::load(dir.path());
    clear_env_override();

    assert!(matches!(loaded, Err(SettingsError::Validation { .. })));
}

#[test]
fn given_valid_settings_when_validated_then_ok() {
    assert!(valid_settings().validate().is_ok());
}

#[test]
fn given_unparseable_origin_when_validated_then_rejected() {
    let settings = OrionSettings {
        artemis_url: String::from("artemis.example"),
        ..valid_settings()
    };

    assert!(matches!(
        settings.validate(),
        Err(SettingsError::Validation { .. })
    ));
}

/// **BUG THIS CATCHES**: Would catch a `file://` or `javascript:` origin being
/// accepted and then loaded into the embedded browser.
#[test]
fn given_non_http_origin_when_validated_then_rejected() {
    for origin in ["file:///etc/passwd", "ftp://artemis.example"] {
        let settings = OrionSettings {
            artemis_url: String::from(origin),
            ..valid_settings()
        };
        assert!(settings.validate().is_err(), "{origin} should be rejected");
    }
}

#[test]
fn given_unsupported_version_when_validated_then_rejected() {
    for version in [0, 2] {
        let settings = OrionSettings {
            version,
            ..valid_settings()
        };
        assert!(settings.validate().is_err(), "version {version}");
    }
}

#[test]
fn given_blank_base_dir_when_validated_then_rejected() {
    let settings = OrionSettings {
        project_base_dir: String::from("   "),
        ..valid_settings()
    };

    assert!(settings.validate().is_err());
}

#[test]
fn given_invalid_settings_when_saved_then_nothing_written() {
    let dir = TempDir::new().unwrap();
    let settings = OrionSettings {
        version: 0,
        ..valid_settings()
    };

    assert!(settings.save(dir.path()).is_err());
    assert!(!dir.path().join("settings.json").exists());
}

#[test]
fn given_settings_when_read_by_key_then_matching_field() {
    let settings = valid_settings();

    assert_eq!(settings.get(SettingKey::ArtemisUrl), "https://artemis.example");
    assert_eq!(
        settings.get(SettingKey::ProjectBaseDir),
        "/home/student/ArtemisProjects"
    );
}

/// **VALUE**: Verifies an update is visible to the next read and persisted.
///
/// **WHY THIS MATTERS**: Routes read the origin on every call; a stale copy
/// would send users to the old platform instance.
#[test]
fn given_shared_settings_when_updated_then_next_read_and_disk_see_change() {
    // GIVEN: Shared settings backed by a temp dir
    let dir = TempDir::new().unwrap();
    let shared = SharedSettings::new(dir.path().to_path_buf(), valid_settings());
    let reader = shared.clone();

    // WHEN: Updating the origin
    let updated = OrionSettings {
        artemis_url: String::from("https://artemis.other.example"),
        ..valid_settings()
    };
    shared.update(updated.clone()).unwrap();

    // THEN: Clones read the new value, and it is on disk
    assert_eq!(
        reader.get(SettingKey::ArtemisUrl),
        "https://artemis.other.example"
    );
    let on_disk: OrionSettings = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("settings.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(on_disk, updated);
}

#[test]
fn given_invalid_update_when_applied_then_rejected_and_unchanged() {
    let dir = TempDir::new().unwrap();
    let shared = SharedSettings::new(dir.path().to_path_buf(), valid_settings());

    let result = shared.update(OrionSettings {
        artemis_url: String::from("nope"),
        ..valid_settings()
    });

    assert!(result.is_err());
    assert_eq!(shared.current(), valid_settings());
    assert!(!dir.path().join("settings.json").exists());
}
