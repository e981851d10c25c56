// Repository query normalization.
// Turns loosely-typed widget settings into the parameters sent to GitHub.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest page size the repository listing endpoint accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Sort order accepted by `GET /users/{username}/repos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepoSort {
    Created,
    Updated,
    Pushed,
    #[default]
    FullName,
}

impl RepoSort {
    /// Map a settings value to a sort order; anything unrecognized becomes `FullName`.
    pub fn from_setting(value: &str) -> Self {
        match value {
            "created" => RepoSort::Created,
            "updated" => RepoSort::Updated,
            "pushed" => RepoSort::Pushed,
            _ => RepoSort::FullName,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepoSort::Created => "created",
            RepoSort::Updated => "updated",
            RepoSort::Pushed => "pushed",
            RepoSort::FullName => "full_name",
        }
    }
}

impl fmt::Display for RepoSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a requested result count to a valid page size.
pub fn normalize_count(count: Option<i64>) -> u32 {
    match count {
        Some(n) if n > 0 => n.min(i64::from(MAX_PER_PAGE)) as u32,
        _ => MAX_PER_PAGE,
    }
}

/// A request for one page of a user's owned repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoQuery {
    pub username: String,
    pub sort: RepoSort,
    pub count: u32,
}

impl RepoQuery {
    pub fn new(username: &str, sort: &str, count: Option<i64>) -> Self {
        Self {
            username: username.trim().to_string(),
            sort: RepoSort::from_setting(sort),
            count: normalize_count(count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_known_values() {
        assert_eq!(RepoSort::from_setting("created"), RepoSort::Created);
        assert_eq!(RepoSort::from_setting("updated"), RepoSort::Updated);
        assert_eq!(RepoSort::from_setting("pushed"), RepoSort::Pushed);
        assert_eq!(RepoSort::from_setting("full_name"), RepoSort::FullName);
    }

    #[test]
    fn test_sort_falls_back_to_full_name() {
        assert_eq!(RepoSort::from_setting("stars"), RepoSort::FullName);
        assert_eq!(RepoSort::from_setting(""), RepoSort::FullName);
        assert_eq!(RepoSort::from_setting("Created"), RepoSort::FullName);
    }

    #[test]
    fn test_count_fallback() {
        assert_eq!(normalize_count(None), 100);
        assert_eq!(normalize_count(Some(0)), 100);
        assert_eq!(normalize_count(Some(-5)), 100);
        assert_eq!(normalize_count(Some(30)), 30);
        assert_eq!(normalize_count(Some(250)), 100);
    }

    #[test]
    fn test_query_trims_username() {
        let query = RepoQuery::new("  octocat ", "created", Some(5));
        assert_eq!(query.username, "octocat");
        assert_eq!(query.sort, RepoSort::Created);
        assert_eq!(query.count, 5);
    }
}
