use slabkit_settings::{Config, ConfigError, SettingsError};
use slabkit_designer::Editor;
use tempfile::tempdir;

#[test]
fn test_toml_and_json_round_trip() {
    let dir = tempdir().unwrap();
    let mut config = Config::new();
    config.editor.history_depth = 80;
    config.overlay.jpeg_quality = 70;
    config.autosave.path = Some(dir.path().join("autosave.json"));

    for name in ["config.toml", "config.json"] {
        let path = dir.path().join("nested").join(name);
        config.save_to_file(&path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }
}

#[test]
fn test_partial_file_takes_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[editor]\nnudge_multiplier = 10.0\n").unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.editor.nudge_multiplier, 10.0);
    assert_eq!(config.editor.history_depth, 50);
    assert_eq!(config.autosave.debounce_ms, 400);
    assert_eq!(config.overlay.default_slab_width, 126.0);
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = Config::new();
    config.editor.snap_radius = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange { key, .. }) if key == "editor.snap_radius"
    ));

    let mut config = Config::new();
    config.editor.default_dimension_offset = 500.0;
    assert!(config.validate().is_err());

    let mut config = Config::new();
    config.overlay.jpeg_quality = 101;
    assert!(config.validate().is_err());

    let mut config = Config::new();
    config.autosave.debounce_ms = 0;
    let dir = tempdir().unwrap();
    let err = config.save_to_file(&dir.path().join("c.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[editor]\nhistory_depth = 0\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::Config(_))
    ));

    std::fs::write(&path, "[editor\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));

    let yaml = dir.path().join("config.yaml");
    std::fs::write(&yaml, "editor: {}").unwrap();
    assert!(matches!(
        Config::load_from_file(&yaml),
        Err(SettingsError::Config(ConfigError::UnsupportedFormat(_)))
    ));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_editor_follows_config() {
    let mut config = Config::new();
    config.editor.history_depth = 2;
    config.editor.default_dimension_offset = -20.0;
    config.overlay.default_slab_width = 110.0;
    config.overlay.default_slab_height = 55.0;

    let mut editor = Editor::with_options(config.editor_options());
    for _ in 0..4 {
        editor.add_piece();
    }
    assert_eq!(editor.undo_depth(), 1);

    editor.add_overlay().unwrap();
    let overlay = &editor.layout().overlays[0];
    assert_eq!((overlay.slab_w, overlay.slab_h), (110.0, 55.0));
}
