// HTML rendering for the repository list widget.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::github::{FetchResult, Repository};

/// Shown in place of the list whenever the fetch failed, whatever the cause.
pub const API_ERROR_MESSAGE: &str = "An error occurred with the GitHub API. Please try again later.";

pub const MISSING_USERNAME_MESSAGE: &str = "Please set a GitHub username.";

const FOLLOW_BUTTON_URL: &str = "https://ghbtns.com/github-btn.html";

pub fn open_widget(out: &mut String) {
    out.push_str(r#"<div class="github-repo-widget">"#);
}

pub fn close_widget(out: &mut String) {
    out.push_str("</div>");
}

/// Title heading, omitted when empty.
pub fn title(out: &mut String, title: &str) {
    if !title.is_empty() {
        out.push_str(r#"<h3 class="widget-title">"#);
        out.push_str(&encode_text(title));
        out.push_str("</h3>");
    }
}

/// Repository list on success, the generic error message otherwise.
pub fn fetch_result(out: &mut String, result: &FetchResult) {
    match result {
        FetchResult::Success(repos) => repo_list(out, repos),
        FetchResult::Failure(_) => out.push_str(API_ERROR_MESSAGE),
    }
}

pub fn repo_list(out: &mut String, repos: &[Repository]) {
    out.push_str("<ul>");
    for repo in repos {
        out.push_str(r#"<li><a href=""#);
        out.push_str(&encode_double_quoted_attribute(&repo.html_url));
        out.push_str(r#"">"#);
        out.push_str(&encode_text(&repo.name));
        out.push_str("</a></li>");
    }
    out.push_str("</ul>");
}

/// Embedded follow button for `username`.
pub fn follow_badge(out: &mut String, username: &str) {
    let src = format!(
        "{}?user={}&type=follow&count=true",
        FOLLOW_BUTTON_URL,
        urlencoding::encode(username)
    );
    out.push_str(r#"<iframe src=""#);
    out.push_str(&encode_double_quoted_attribute(&src));
    out.push_str(
        r#"" allowtransparency="true" frameborder="0" scrolling="0" width="165px" height="20px" style="display:block;margin:15px auto 0;"></iframe>"#,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::FetchFailure;

    #[test]
    fn test_repo_list_escapes() {
        let mut out = String::new();
        repo_list(
            &mut out,
            &[Repository {
                name: "<script>".to_string(),
                html_url: "https://github.com/a/\"b\"".to_string(),
            }],
        );

        assert!(out.contains("&lt;script&gt;"));
        assert!(!out.contains("\"b\""));
    }

    #[test]
    fn test_failure_renders_message_only() {
        let mut out = String::new();
        fetch_result(
            &mut out,
            &FetchResult::Failure(FetchFailure::Parse {
                reason: "expected array".to_string(),
            }),
        );

        assert_eq!(out, API_ERROR_MESSAGE);
    }

    #[test]
    fn test_empty_success_renders_empty_list() {
        let mut out = String::new();
        fetch_result(&mut out, &FetchResult::Success(Vec::new()));
        assert_eq!(out, "<ul></ul>");
    }

    #[test]
    fn test_follow_badge_encodes_username() {
        let mut out = String::new();
        follow_badge(&mut out, "octo cat");

        assert!(out.contains("user=octo%20cat&amp;type=follow&amp;count=true"));
        assert!(out.starts_with("<iframe"));
    }

    #[test]
    fn test_empty_title_omitted() {
        let mut out = String::new();
        title(&mut out, "");
        assert!(out.is_empty());
    }
}
