// Widget module.
// The entry points a host page calls: render the list, react to saved settings.

pub mod render;
pub mod settings;

pub use render::{API_ERROR_MESSAGE, MISSING_USERNAME_MESSAGE};
pub use settings::{SettingsOverrides, WidgetSettings};

use tracing::{debug, info};

use crate::fetcher::RepoFetcher;

/// Repository list widget backed by a caching fetcher.
pub struct Widget {
    fetcher: RepoFetcher,
}

impl Widget {
    pub fn new(fetcher: RepoFetcher) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &RepoFetcher {
        &self.fetcher
    }

    /// Render the widget as an HTML fragment. Never fails; errors become a message.
    pub async fn render(&self, settings: &WidgetSettings) -> String {
        let mut out = String::new();
        render::open_widget(&mut out);
        render::title(&mut out, &settings.title);

        match settings.query() {
            Some(query) => {
                let result = self.fetcher.fetch(&query).await;
                render::fetch_result(&mut out, &result);

                if settings.badge {
                    render::follow_badge(&mut out, &query.username);
                }
            }
            None => {
                debug!("widget has no username configured");
                out.push_str(MISSING_USERNAME_MESSAGE);
            }
        }

        render::close_widget(&mut out);
        out
    }

    /// Drop the cache entry belonging to the previous settings.
    ///
    /// Runs on every save, including when the username did not change.
    pub fn on_settings_saved(&self, old: &WidgetSettings, new: &WidgetSettings) {
        if let Some(query) = old.query() {
            info!(
                old_username = %query.username,
                new_username = %new.username.trim(),
                "widget settings saved, invalidating cached repositories"
            );
            self.fetcher.invalidate(&query);
        }
    }
}
