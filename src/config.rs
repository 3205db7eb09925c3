use crate::backend::Pillar;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default config file, looked up relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/faiv-console";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub loader: LoaderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub default_pillar: Pillar,
    /// Unset means the transport default
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Cosmetic progress animation shown while a query is outstanding
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    /// Time at which the bar would reach 100% if it were not capped
    pub expected_ms: u64,
    /// Highest percentage shown before the response arrives
    pub cap_percent: u8,
    pub tick_ms: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl LoaderConfig {
    pub fn expected(&self) -> Duration {
        Duration::from_millis(self.expected_ms)
    }

    pub fn tick(&self) -> Duration {
        // interval() panics on a zero period
        Duration::from_millis(self.tick_ms.max(1))
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            expected_ms: 8000,
            cap_percent: 99,
            tick_ms: 500,
        }
    }
}

/// Platform data directory for sessions, or a local fallback
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("faiv-console"))
        .unwrap_or_else(|| PathBuf::from(".faiv-console"))
}

impl Config {
    /// Load configuration from built-in defaults, then the optional file at
    /// `path`, then `FAIV__SECTION__KEY` environment variables
    pub fn load(path: &str) -> Result<Self> {
        let loader = LoaderConfig::default();

        let settings = config::Config::builder()
            .set_default("backend.base_url", "http://127.0.0.1:8000")?
            .set_default("backend.default_pillar", Pillar::default().as_str())?
            .set_default(
                "storage.data_dir",
                default_data_dir().to_string_lossy().to_string(),
            )?
            .set_default("loader.expected_ms", loader.expected_ms as i64)?
            .set_default("loader.cap_percent", loader.cap_percent as i64)?
            .set_default("loader.tick_ms", loader.tick_ms as i64)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("FAIV")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .context("Failed to build configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load("does/not/exist/faiv-console").unwrap();
        assert_eq!(cfg.backend.base_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.backend.default_pillar, Pillar::Faiv);
        assert_eq!(cfg.backend.timeout(), None);
        assert_eq!(cfg.loader.cap_percent, 99);
        assert_eq!(cfg.loader.expected(), Duration::from_secs(8));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("faiv.toml");
        std::fs::write(
            &path,
            "[backend]\nbase_url = \"http://decisions.local:9000\"\ndefault_pillar = \"Wisdom\"\ntimeout_secs = 30\n",
        )
        .unwrap();

        let cfg = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.backend.base_url, "http://decisions.local:9000");
        assert_eq!(cfg.backend.default_pillar, Pillar::Wisdom);
        assert_eq!(cfg.backend.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(cfg.loader.tick_ms, 500);
    }

    #[test]
    fn test_pillar_name_in_file_is_case_insensitive() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("faiv.toml");
        std::fs::write(&path, "[backend]\ndefault_pillar = \"wisdom\"\n").unwrap();

        let cfg = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.backend.default_pillar, Pillar::Wisdom);
    }

    #[test]
    fn test_unknown_pillar_in_file_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("faiv.toml");
        std::fs::write(&path, "[backend]\ndefault_pillar = \"Finance\"\n").unwrap();

        assert!(Config::load(path.to_str().unwrap()).is_err());
    }
}
