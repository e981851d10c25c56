// GitHub API response types and fetch outcomes.
// Defines the repository shape we read from the API and the cached result union.

use std::fmt;

use serde::{Deserialize, Serialize};

/// GitHub repository, reduced to the fields the widget displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
}

/// Why a fetch did not produce a repository list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchFailure {
    /// No usable response: connection, DNS, TLS, timeout, or body read failure.
    Transport { reason: String },
    /// A response arrived but its status was not 200 OK.
    Api { status: u16, message: String },
    /// The body was not a JSON array of repositories.
    Parse { reason: String },
}

impl FetchFailure {
    /// Short machine-friendly name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchFailure::Transport { .. } => "transport_error",
            FetchFailure::Api { .. } => "api_error",
            FetchFailure::Parse { .. } => "parse_error",
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Transport { reason } => write!(f, "transport error: {}", reason),
            FetchFailure::Api { status, message } => {
                write!(f, "API error: HTTP {} {}", status, message)
            }
            FetchFailure::Parse { reason } => write!(f, "parse error: {}", reason),
        }
    }
}

/// Outcome of resolving a repository query. Both variants are cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum FetchResult {
    Success(Vec<Repository>),
    Failure(FetchFailure),
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    pub fn repositories(&self) -> Option<&[Repository]> {
        match self {
            FetchResult::Success(repos) => Some(repos),
            FetchResult::Failure(_) => None,
        }
    }
}

/// Parse a repository list response body.
pub fn parse_repositories(body: &str) -> Result<Vec<Repository>, FetchFailure> {
    serde_json::from_str(body).map_err(|e| FetchFailure::Parse {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_extra_fields() {
        let body = r#"[
            {"id": 1, "name": "Hello-World", "html_url": "https://github.com/octocat/Hello-World", "fork": false},
            {"id": 2, "name": "Spoon-Knife", "html_url": "https://github.com/octocat/Spoon-Knife"}
        ]"#;

        let repos = parse_repositories(body).unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "Hello-World");
        assert_eq!(repos[1].html_url, "https://github.com/octocat/Spoon-Knife");
    }

    #[test]
    fn test_parse_empty_array() {
        assert_eq!(parse_repositories("[]").unwrap(), Vec::new());
    }

    #[test]
    fn test_parse_rejects_object_body() {
        let body = r#"{"message": "Not Found"}"#;
        let err = parse_repositories(body).unwrap_err();
        assert_eq!(err.kind(), "parse_error");
    }

    #[test]
    fn test_parse_rejects_missing_html_url() {
        let err = parse_repositories(r#"[{"name": "x"}]"#).unwrap_err();
        assert!(matches!(err, FetchFailure::Parse { .. }));
    }

    #[test]
    fn test_failure_serializes_with_kind_tag() {
        let result = FetchResult::Failure(FetchFailure::Api {
            status: 403,
            message: "Forbidden".to_string(),
        });

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""kind":"api""#));

        let back: FetchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
