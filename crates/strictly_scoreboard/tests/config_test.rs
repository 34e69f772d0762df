//! Tests for startup configuration.

use std::io::Write;

use strictly_scoreboard::{Difficulty, GameMode, GameStore, Scores, StoreConfig};

#[test]
fn test_empty_config_uses_defaults() {
    let config = StoreConfig::from_toml_str("").expect("Empty config is valid");
    assert_eq!(*config.game_mode(), GameMode::Pvc);
    assert_eq!(*config.difficulty(), Difficulty::Medium);
    assert_eq!(config, StoreConfig::default());
}

#[test]
fn test_explicit_values() {
    let config = StoreConfig::from_toml_str("game_mode = \"pvp\"\ndifficulty = \"hard\"\n")
        .expect("Valid config");
    assert_eq!(config, StoreConfig::new(GameMode::Pvp, Difficulty::Hard));
}

#[test]
fn test_invalid_value_rejected() {
    let err = StoreConfig::from_toml_str("difficulty = \"impossible\"").unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("Temp file");
    writeln!(file, "game_mode = \"pvp\"").expect("Write config");

    let config = StoreConfig::from_file(file.path()).expect("Config loads");
    assert_eq!(*config.game_mode(), GameMode::Pvp);
    assert_eq!(*config.difficulty(), Difficulty::Medium);
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let err = StoreConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_store_from_config() {
    let config = StoreConfig::new(GameMode::Pvp, Difficulty::Easy);
    let store = GameStore::from_config(&config);

    let state = store.get();
    assert_eq!(state.scores, Scores::default());
    assert_eq!(state.game_mode, GameMode::Pvp);
    assert_eq!(state.difficulty, Difficulty::Easy);
}
