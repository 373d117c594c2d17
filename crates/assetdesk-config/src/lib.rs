//! Configuration for the assetdesk terminal client.
//!
//! Layers, lowest priority first: built-in defaults, `config.toml` in the
//! platform config directory, then `ASSETDESK_` environment variables
//! (nested keys split on `__`, e.g. `ASSETDESK_API__BASE_URL`). Command-line
//! flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use assetdesk_core::ServiceConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Backend base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// View shown at startup ("dashboard", "vms", "aws", ...).
    #[serde(default = "default_start_view")]
    pub start_view: String,

    #[serde(default = "default_true")]
    pub sidebar_open: bool,

    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            start_view: default_start_view(),
            sidebar_open: true,
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl UiSettings {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_start_view() -> String {
    "dashboard".into()
}
fn default_true() -> bool {
    true
}
fn default_tick_rate() -> u64 {
    250
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "assetdesk", "assetdesk").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("assetdesk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ASSETDESK_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build the core `ServiceConfig` from the `[api]` table.
pub fn to_service_config(cfg: &Config) -> Result<ServiceConfig, ConfigError> {
    let url: url::Url = cfg
        .api
        .base_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api.base_url".into(),
            reason: format!("invalid URL: {}", cfg.api.base_url),
        })?;

    if cfg.api.timeout_secs == 0 {
        return Err(ConfigError::Validation {
            field: "api.timeout_secs".into(),
            reason: "must be at least 1".into(),
        });
    }

    Ok(ServiceConfig::new(url).with_timeout(Duration::from_secs(cfg.api.timeout_secs)))
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.api.base_url, "http://localhost:8000");
        assert_eq!(cfg.api.timeout_secs, 30);
        assert_eq!(cfg.ui.start_view, "dashboard");
        assert!(cfg.ui.sidebar_open);
        assert_eq!(cfg.ui.tick_rate(), Duration::from_millis(250));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.api, ApiSettings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nstart_view = \"vms\"\n").unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.ui.start_view, "vms");
        assert!(cfg.ui.sidebar_open);
        assert_eq!(cfg.api.timeout_secs, 30);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.api.base_url = "http://inventory.internal:9000/api".into();
        cfg.ui.sidebar_open = false;

        save_config_to(&cfg, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn service_config_translation() {
        let mut cfg = Config::default();
        cfg.api.timeout_secs = 5;
        let service = to_service_config(&cfg).unwrap();
        assert_eq!(service.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(service.timeout, Duration::from_secs(5));

        cfg.api.base_url = "not a url".into();
        let err = to_service_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api.base_url"));
    }
}
