use jogpad_core::{MeasurementSystem, PreferenceKey, Preferences};
use jogpad_settings::{Config, SettingsError, SettingsPersistence};
use tempfile::tempdir;

#[test]
fn test_json_and_toml_round_trip() {
    let dir = tempdir().unwrap();

    let mut config = Config::default();
    config.ui.measurement_system = MeasurementSystem::Imperial;
    config.jog.selected_distance = String::new();
    config.jog.custom_distance = "25.4".to_string();
    config.keybindings.insert("]".to_string(), "JOG_FORWARD".to_string());

    for name in ["config.json", "config.toml"] {
        let path = dir.path().join(name);
        config.save_to_file(&path).unwrap();
        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config, "{}", name);
    }
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let err = Config::default().save_to_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));
    assert!(!path.exists());
}

#[test]
fn test_invalid_file_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[jog]\ncustom_distance = \"lots\"\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { .. }));
}

#[test]
fn test_malformed_json_reports_json_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::JsonError(_))
    ));
}

#[test]
fn test_persistence_creates_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("jogpad").join("config.toml");

    let mut settings = SettingsPersistence::load_or_default(&path).unwrap();
    settings.config_mut().jog.selected_distance = "0.1".to_string();
    settings.save().unwrap();
    assert!(path.exists());

    let reloaded = SettingsPersistence::load_or_default(&path).unwrap();
    assert_eq!(
        reloaded.config().preference(PreferenceKey::SelectedDistance).as_deref(),
        Some("0.1")
    );
    assert_eq!(reloaded.path(), path.as_path());
}
