use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// WebSocket endpoint of the playback backend.
    #[serde(default = "platform::default_backend_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Fraction of the timeline jumped by the ←/→ keys.
    #[serde(default = "default_seek_step")]
    pub seek_step: f64,
    /// Redraw / spinner tick.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: platform::default_backend_url(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            seek_step: default_seek_step(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_seek_step() -> f64 {
    0.05
}

fn default_tick_ms() -> u64 {
    100
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load from the platform config path, writing defaults on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.url, "ws://127.0.0.1:8080");
        assert_eq!(config.ui.seek_step, 0.05);
        assert_eq!(config.ui.tick_ms, 100);
        assert_eq!(config.log.filter, "info");
        assert!(Config::config_path().ends_with("mpv-remote/config.toml"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[backend]\nurl = \"ws://media-box:8080\"\n").unwrap();
        assert_eq!(config.backend.url, "ws://media-box:8080");
        assert_eq!(config.ui.tick_ms, 100);
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.backend.url, platform::default_backend_url());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.ui.seek_step, config.ui.seek_step);
    }
}
