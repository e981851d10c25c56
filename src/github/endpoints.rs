// GitHub API endpoint functions.
// Fetches a user's owned repositories and classifies the outcome.

use reqwest::StatusCode;
use tracing::debug;

use crate::query::RepoQuery;

use super::client::GitHubClient;
use super::types::{FetchFailure, Repository, parse_repositories};

impl GitHubClient {
    /// Get one page of repositories owned by `query.username`.
    ///
    /// Issues exactly one request. Anything other than `200 OK` is an API error.
    pub async fn get_owner_repos(
        &self,
        query: &RepoQuery,
    ) -> Result<Vec<Repository>, FetchFailure> {
        let endpoint = format!("/users/{}/repos", urlencoding::encode(&query.username));
        let params = [
            ("type", "owner"),
            ("per_page", &query.count.to_string()),
            ("sort", query.sort.as_str()),
        ];

        let response = self
            .get_with_params(&endpoint, &params)
            .await
            .map_err(|e| FetchFailure::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        debug!(username = %query.username, status = status.as_u16(), "GitHub responded");

        if status != StatusCode::OK {
            return Err(FetchFailure::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await.map_err(|e| FetchFailure::Transport {
            reason: e.to_string(),
        })?;

        parse_repositories(&body)
    }
}
