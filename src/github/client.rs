// GitHub API HTTP client.
// Unauthenticated requests with fixed headers and a configurable transport.

use std::time::Duration;

use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const DEFAULT_USER_AGENT: &str = concat!("ghrepos/", env!("CARGO_PKG_VERSION"));

/// Transport settings for the GitHub client (the `[github]` config section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the REST API.
    pub api_base: String,
    pub user_agent: String,
    /// Request timeout; unset leaves the client without one.
    pub timeout_secs: Option<u64>,
    /// Accept invalid TLS certificates. Insecure; off unless explicitly set.
    pub insecure_skip_tls_verify: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: GITHUB_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
            insecure_skip_tls_verify: false,
        }
    }
}

/// GitHub API client. Sends no credentials.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a client against the configured API base.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_base_url(config.api_base.clone(), config)
    }

    /// Create a client against an explicit base URL (stub servers, GitHub Enterprise).
    pub fn with_base_url(base_url: impl Into<String>, config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);

        let mut builder = Client::builder().default_headers(headers);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if config.insecure_skip_tls_verify {
            warn!("TLS certificate verification is disabled for GitHub API requests");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request with query parameters.
    ///
    /// Only transport failures are errors here; any HTTP status is returned as a response.
    pub async fn get_with_params<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> std::result::Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.client.get(&url).query(params).send().await
    }
}
