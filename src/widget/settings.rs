// Widget settings as saved by the host page.

use serde::{Deserialize, Serialize};

use crate::query::RepoQuery;

/// Saved configuration for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub title: String,
    pub username: String,
    /// One of `created`, `updated`, `pushed`, `full_name`; anything else sorts by name.
    pub sort: String,
    /// Number of repositories to request; unset or non-positive means the maximum.
    pub count: Option<i64>,
    /// Show the GitHub follow button under the list.
    pub badge: bool,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            title: String::new(),
            username: String::new(),
            sort: "full_name".to_string(),
            count: None,
            badge: false,
        }
    }
}

impl WidgetSettings {
    /// The repository query these settings describe, or `None` without a username.
    pub fn query(&self) -> Option<RepoQuery> {
        let query = RepoQuery::new(&self.username, &self.sort, self.count);
        (!query.username.is_empty()).then_some(query)
    }
}

/// Per-field replacements for saved settings; `None` keeps the saved value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub title: Option<String>,
    pub username: Option<String>,
    pub sort: Option<String>,
    pub count: Option<i64>,
    pub badge: Option<bool>,
}

impl SettingsOverrides {
    pub fn apply(self, base: &WidgetSettings) -> WidgetSettings {
        WidgetSettings {
            title: self.title.unwrap_or_else(|| base.title.clone()),
            username: self.username.unwrap_or_else(|| base.username.clone()),
            sort: self.sort.unwrap_or_else(|| base.sort.clone()),
            count: self.count.or(base.count),
            badge: self.badge.unwrap_or(base.badge),
        }
    }
}
