// Configuration loading.
// TOML file with per-concern sections; every field has a default.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::REPO_CACHE_TTL;
use crate::error::{GhReposError, Result};
use crate::github::ClientConfig;
use crate::widget::WidgetSettings;

const CONFIG_FILE_NAME: &str = "ghrepos.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: ClientConfig,

    pub cache: CacheConfig,

    pub logging: LoggingConfig,

    pub widget: WidgetSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Lives as long as the process.
    Memory,
    /// JSON files under the cache directory.
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,

    /// Overrides the platform cache directory for the file backend.
    pub dir: Option<PathBuf>,

    pub ttl_secs: u64,

    /// Key entries on username, sort and count instead of username alone.
    pub key_on_full_query: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            dir: None,
            ttl_secs: REPO_CACHE_TTL.as_secs(),
            key_on_full_query: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load the first config file found, or defaults if there is none.
    pub fn load() -> Result<Self> {
        match Self::find_path() {
            Some(path) => {
                info!("Loading config from: {}", path.display());
                Self::load_from_path(&path)
            }
            None => {
                info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// First existing file among the search paths.
    pub fn find_path() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|path| path.exists())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    /// Where `save` writes: an existing config file if any, else the working directory.
    pub fn default_config_path() -> PathBuf {
        Self::find_path().unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];

        if let Some(dirs) = ProjectDirs::from("", "", "ghrepos") {
            paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.github.api_base.trim().is_empty() {
            return Err(GhReposError::InvalidConfig(
                "github.api_base cannot be empty".to_string(),
            ));
        }

        if self.github.timeout_secs == Some(0) {
            return Err(GhReposError::InvalidConfig(
                "github.timeout_secs must be > 0 when set".to_string(),
            ));
        }

        if self.cache.ttl_secs == 0 {
            return Err(GhReposError::InvalidConfig(
                "cache.ttl_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
