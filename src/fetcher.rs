// Repository fetcher.
// Resolves a query from the cache or a single GitHub request, writing every outcome back.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{CacheStore, REPO_CACHE_TTL};
use crate::github::{FetchResult, GitHubClient};
use crate::query::RepoQuery;

const CACHE_KEY_PREFIX: &str = "ja_github_repos_";

/// Fetches repository listings through a cache.
pub struct RepoFetcher {
    client: GitHubClient,
    cache: Arc<dyn CacheStore>,
    ttl: Duration,
    full_query_key: bool,
}

impl RepoFetcher {
    pub fn new(client: GitHubClient, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            client,
            cache,
            ttl: REPO_CACHE_TTL,
            full_query_key: false,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Include sort and count in the cache key so changing them bypasses stale lists.
    pub fn with_full_query_key(mut self, enabled: bool) -> Self {
        self.full_query_key = enabled;
        self
    }

    /// Cache key for a query. By default only the username participates.
    pub fn cache_key(&self, query: &RepoQuery) -> String {
        if self.full_query_key {
            format!(
                "{}{}_{}_{}",
                CACHE_KEY_PREFIX, query.username, query.sort, query.count
            )
        } else {
            format!("{}{}", CACHE_KEY_PREFIX, query.username)
        }
    }

    /// Resolve a query, hitting the network at most once.
    ///
    /// On a cache hit the stored result is returned as-is, even if it was
    /// computed for different sort/count options.
    pub async fn fetch(&self, query: &RepoQuery) -> FetchResult {
        let key = self.cache_key(query);

        match self.cache.get(&key) {
            Ok(Some(cached)) => {
                debug!(key = %key, success = cached.is_success(), "repo cache hit");
                return cached;
            }
            Ok(None) => debug!(key = %key, "repo cache miss"),
            Err(e) => warn!(key = %key, error = %e, "repo cache read failed, treating as miss"),
        }

        info!(
            username = %query.username,
            sort = %query.sort,
            per_page = query.count,
            "fetching repositories from GitHub"
        );

        let result = match self.client.get_owner_repos(query).await {
            Ok(repos) => {
                info!(username = %query.username, count = repos.len(), "fetched repositories");
                FetchResult::Success(repos)
            }
            Err(failure) => {
                warn!(
                    username = %query.username,
                    kind = failure.kind(),
                    error = %failure,
                    "repository fetch failed"
                );
                FetchResult::Failure(failure)
            }
        };

        if let Err(e) = self.cache.set(&key, &result, self.ttl) {
            warn!(key = %key, error = %e, "repo cache write failed");
        }

        result
    }

    /// Drop the cached result for a query so the next fetch goes to the network.
    pub fn invalidate(&self, query: &RepoQuery) {
        let key = self.cache_key(query);
        match self.cache.invalidate(&key) {
            Ok(()) => debug!(key = %key, "repo cache invalidated"),
            Err(e) => warn!(key = %key, error = %e, "repo cache invalidation failed"),
        }
    }
}
