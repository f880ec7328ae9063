use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub model_path: PathBuf,
    pub max_sessions: usize,
    pub body_limit_bytes: usize,
    /// Sessions untouched for this long are evicted when a new one is created.
    pub session_idle_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8501".into(),
            model_path: PathBuf::from("heart_model.json"),
            max_sessions: 1024,
            body_limit_bytes: 64 * 1024,
            session_idle_secs: 30 * 60,
        }
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE))
}

/// Defaults, then the optional TOML file, then `APP__*` environment
/// variables (e.g. `APP__SERVER_BIND`, `APP__MODEL_PATH`).
pub fn load_settings_from(file: &Path) -> anyhow::Result<Settings> {
    let defaults = Settings::default();
    let raw = Config::builder()
        .set_default("server_bind", defaults.server_bind)?
        .set_default(
            "model_path",
            defaults.model_path.to_string_lossy().into_owned(),
        )?
        .set_default("max_sessions", defaults.max_sessions as i64)?
        .set_default("body_limit_bytes", defaults.body_limit_bytes as i64)?
        .set_default("session_idle_secs", defaults.session_idle_secs as i64)?
        .add_source(File::from(file).format(FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("failed to read settings from '{}'", file.display()))?;

    let settings: Settings = raw
        .try_deserialize()
        .context("invalid server settings")?;
    if settings.max_sessions == 0 {
        anyhow::bail!("max_sessions must be at least 1");
    }
    if settings.session_idle_secs == 0 {
        anyhow::bail!("session_idle_secs must be at least 1");
    }
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
