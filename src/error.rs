// Error types for ghrepos.
// Covers HTTP client setup, cache backends, and configuration loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhReposError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Cache lock poisoned")]
    LockPoisoned,

    #[error("No cache directory available on this platform")]
    NoCacheDir,
}

pub type Result<T> = std::result::Result<T, GhReposError>;
