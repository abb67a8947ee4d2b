//! Server settings from `~/.config/tubescribe/config.toml` (Unix) or
//! `%APPDATA%/tubescribe/config.toml` (Windows), overridable from the
//! environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::connectors::youtube::DEFAULT_LANGUAGE;

pub const CONFIG_PATH_ENV: &str = "TUBESCRIBE_CONFIG";
pub const DEFAULT_LANG_ENV: &str = "TUBESCRIBE_DEFAULT_LANG";
pub const LOG_FILTER_ENV: &str = "TUBESCRIBE_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Subtitle language used when a call omits `lang`.
    pub default_language: String,
    /// `tracing` filter directive, used unless `RUST_LOG` is set.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            log_filter: "tubescribe=info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn default_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("tubescribe").join("config.toml")
    }

    /// Loads the config file (a missing file means defaults) and applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_path);

        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Applies `TUBESCRIBE_*` overrides; blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(lang) = non_blank(DEFAULT_LANG_ENV) {
            self.default_language = lang.trim().to_string();
        }
        if let Some(filter) = non_blank(LOG_FILTER_ENV) {
            self.log_filter = filter;
        }
    }
}
