// ghrepos: a GitHub user's repository list, fetched once and cached.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod query;
pub mod widget;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use cache::{CacheStore, FileCache, MemoryCache};
pub use config::{CacheBackend, Config};
pub use error::{GhReposError, Result};
pub use fetcher::RepoFetcher;
use github::GitHubClient;
pub use github::{FetchFailure, FetchResult, Repository};
pub use query::{RepoQuery, RepoSort};
pub use widget::{SettingsOverrides, Widget, WidgetSettings};

/// Open the cache backend selected in `config`.
pub fn build_cache(config: &Config) -> Result<Arc<dyn CacheStore>> {
    let cache: Arc<dyn CacheStore> = match config.cache.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::File => match &config.cache.dir {
            Some(dir) => Arc::new(FileCache::new(dir)),
            None => Arc::new(FileCache::in_default_dir()?),
        },
    };
    Ok(cache)
}

/// Assemble a widget from configuration.
pub fn build_widget(config: &Config) -> Result<Widget> {
    let client = GitHubClient::new(&config.github)?;
    let fetcher = RepoFetcher::new(client, build_cache(config)?)
        .with_ttl(Duration::from_secs(config.cache.ttl_secs))
        .with_full_query_key(config.cache.key_on_full_query);
    Ok(Widget::new(fetcher))
}

/// Persist new widget settings to `path`, then drop the cache entry for the old ones.
///
/// Returns the settings that were written.
pub fn save_settings(
    widget: &Widget,
    config: &Config,
    path: &Path,
    overrides: SettingsOverrides,
) -> Result<WidgetSettings> {
    let old = &config.widget;
    let new = overrides.apply(old);

    let mut updated = config.clone();
    updated.widget = new.clone();
    updated.save_to_path(path)?;

    widget.on_settings_saved(old, &new);
    Ok(new)
}
