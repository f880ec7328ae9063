use super::{load_settings_from, Settings};

use std::{fs, path::Path};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("dir");
    let settings = load_settings_from(&dir.path().join("server.toml")).expect("settings");
    let defaults = Settings::default();
    assert_eq!(settings.model_path, defaults.model_path);
    assert_eq!(settings.max_sessions, defaults.max_sessions);
    assert_eq!(settings.body_limit_bytes, defaults.body_limit_bytes);
    assert_eq!(settings.session_idle_secs, 1800);
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("dir");
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        "model_path = \"models/heart.json\"\nmax_sessions = 8\nsession_idle_secs = 120\n",
    )
    .expect("write");

    let settings = load_settings_from(&path).expect("settings");
    assert_eq!(settings.model_path, Path::new("models/heart.json"));
    assert_eq!(settings.max_sessions, 8);
    assert_eq!(settings.session_idle_secs, 120);
    assert_eq!(settings.body_limit_bytes, Settings::default().body_limit_bytes);
}

#[test]
fn zero_session_cap_is_rejected() {
    let dir = tempfile::tempdir().expect("dir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "max_sessions = 0\n").expect("write");
    assert!(load_settings_from(&path).is_err());
}

#[test]
fn zero_idle_timeout_is_rejected() {
    let dir = tempfile::tempdir().expect("dir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "session_idle_secs = 0\n").expect("write");
    assert!(load_settings_from(&path).is_err());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().expect("dir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "max_sessions = [\n").expect("write");
    assert!(load_settings_from(&path).is_err());
}
