// Cache path utilities.
// Maps cache keys onto files inside the cache directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/ghrepos on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ghrepos").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the file holding one cache entry.
pub fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join("transients").join(format!("{}.json", sanitize_name(key)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("ja_github_repos_octocat"), "ja_github_repos_octocat");
        assert_eq!(sanitize_name("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize_name("owner:name"), "owner_name");
    }

    #[test]
    fn test_entry_path() {
        let path = entry_path(Path::new("/tmp/cache"), "ja_github_repos_octocat");
        assert!(path.ends_with("transients/ja_github_repos_octocat.json"));
    }
}
