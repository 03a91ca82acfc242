//! Tests for editor configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        mode = "free"

        [preview]
        debounce_ms = 100

        [history]
        max_depth = 25

        [evaluation]
        dedupe_assignments = true
    "#;

    let config = EditorConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.mode, EditMode::Free);
    assert_eq!(config.preview.debounce_ms, 100);
    assert_eq!(config.history.max_depth, Some(25));
    assert!(config.evaluation.dedupe_assignments);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        mode: strict
        preview:
          debounce_ms: 150
        history:
          max_depth: 10
    "#;

    let config = EditorConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.mode, EditMode::Strict);
    assert_eq!(config.preview.debounce(), Duration::from_millis(150));
    assert!(!config.evaluation.dedupe_assignments);
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = EditorConfig::from_toml_str("").unwrap();
    assert_eq!(config, EditorConfig::default());
    assert_eq!(config.mode, EditMode::Warn);
    assert_eq!(config.preview.debounce_ms, DEFAULT_DEBOUNCE_MS);
    assert_eq!(config.history.max_depth, None);
}

#[test]
fn test_partial_section_uses_defaults() {
    let config = EditorConfig::from_toml_str("[preview]\n").unwrap();
    assert_eq!(config.preview.debounce_ms, DEFAULT_DEBOUNCE_MS);
}

#[test]
fn test_zero_history_depth_rejected() {
    let err = EditorConfig::from_toml_str("[history]\nmax_depth = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_mode_rejected() {
    let err = EditorConfig::from_toml_str(r#"mode = "lenient""#).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file() {
    let err = EditorConfig::load("/nonexistent/groupforge/editor.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_builder() {
    let config = EditorConfig::new()
        .with_mode(EditMode::Strict)
        .with_debounce_ms(200)
        .with_history_depth(5)
        .with_dedupe_assignments(true);

    assert!(config.mode.is_strict());
    assert_eq!(config.preview.debounce_ms, 200);
    assert_eq!(config.history.max_depth, Some(5));
    assert!(config.evaluation.dedupe_assignments);
}
