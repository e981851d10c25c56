// GitHub API module.
// Provides the unauthenticated client and types for the user repository listing.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{ClientConfig, GITHUB_API_BASE, GitHubClient};
pub use types::{FetchFailure, FetchResult, Repository, parse_repositories};
