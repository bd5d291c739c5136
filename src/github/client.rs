//! Blocking GitHub REST client

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::types::{FileContent, LanguageShare, Repository, TreeEntry, TreeResponse, User};
use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub api_url: String,
    /// Sent as `Authorization: Bearer <token>` when set
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// One-shot request/response wrappers around the GitHub REST endpoints this
/// tool needs.
///
/// Failures are logged and returned; nothing is retried.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    base: Url,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self> {
        let base = Url::parse(&config.api_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| Error::InvalidUrl(config.api_url.clone()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(concat!("commentscan/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|source| Error::Http {
                url: config.api_url.clone(),
                source,
            })?;

        Ok(Self { http, base })
    }

    /// Build the URL for an API path given as segments. Each segment is
    /// percent-encoded; slashes inside a segment are encoded too.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    /// `GET /users/{user}`
    pub fn fetch_user(&self, user: &str) -> Result<User> {
        let url = self.endpoint(&["users", user], &[]);
        self.get(url, "a user")
    }

    /// `GET /users/{user}/repos?sort=updated`, most recently updated first.
    pub fn fetch_user_repositories(&self, user: &str) -> Result<Vec<Repository>> {
        let url = self.endpoint(&["users", user, "repos"], &[("sort", "updated")]);
        self.get(url, "repositories of a user")
    }

    /// `GET /repos/{user}/{repo}`
    pub fn fetch_repository(&self, user: &str, repo: &str) -> Result<Repository> {
        let url = self.endpoint(&["repos", user, repo], &[]);
        self.get(url, "a repository")
    }

    /// `GET /repos/{user}/{repo}/contents/{path}`
    ///
    /// `path` is a `/`-separated path inside the repository.
    pub fn fetch_repository_content(
        &self,
        user: &str,
        repo: &str,
        path: &str,
    ) -> Result<FileContent> {
        self.fetch_content(user, repo, path, &[])
    }

    /// Like [`fetch_repository_content`](Self::fetch_repository_content), read
    /// at a branch, tag or commit instead of the default branch.
    pub fn fetch_repository_content_at(
        &self,
        user: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<FileContent> {
        self.fetch_content(user, repo, path, &[("ref", git_ref)])
    }

    fn fetch_content(
        &self,
        user: &str,
        repo: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<FileContent> {
        let mut segments = vec!["repos", user, repo, "contents"];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        let url = self.endpoint(&segments, query);
        self.get(url, "repository content")
    }

    /// `GET /repos/{user}/{repo}/git/trees/{branch}?recursive=1`
    ///
    /// Returns every entry of the tree, directories included.
    pub fn fetch_repository_tree(
        &self,
        user: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<TreeEntry>> {
        let url = self.endpoint(
            &["repos", user, repo, "git", "trees", branch],
            &[("recursive", "1")],
        );
        let response: TreeResponse = self.get(url, "a repository tree")?;
        if response.truncated {
            warn!(
                "tree {} of {}/{} was truncated by GitHub; some files will not be scanned",
                response.sha, user, repo
            );
        }
        Ok(response.tree)
    }

    /// `GET /repos/{user}/{repo}/languages`, largest language first.
    pub fn fetch_repository_languages(&self, user: &str, repo: &str) -> Result<Vec<LanguageShare>> {
        let url = self.endpoint(&["repos", user, repo, "languages"], &[]);
        let languages: serde_json::Map<String, serde_json::Value> =
            self.get(url, "a repository languages")?;
        Ok(languages_from_map(languages))
    }

    fn get<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        debug!("GET {}", url);
        let result = self.send(&url);
        if let Err(e) = &result {
            error!("Error fetching {}: {}", what, e);
        }
        result
    }

    fn send<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let response = self.http.get(url.clone()).send().map_err(|source| Error::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().map_err(|e| Error::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Keep GitHub's order (largest first); non-numeric values count as zero.
fn languages_from_map(map: serde_json::Map<String, serde_json::Value>) -> Vec<LanguageShare> {
    map.into_iter()
        .map(|(name, bytes)| LanguageShare {
            name,
            bytes: bytes.as_u64().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> GithubClient {
        GithubClient::new(GithubConfig {
            api_url: api_url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        let c = client(DEFAULT_API_URL);
        assert_eq!(
            c.endpoint(&["users", "octocat"], &[]).as_str(),
            "https://api.github.com/users/octocat"
        );
        assert_eq!(
            c.endpoint(&["users", "octocat", "repos"], &[("sort", "updated")])
                .as_str(),
            "https://api.github.com/users/octocat/repos?sort=updated"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client("https://ghe.example.com/api/v3/");
        assert_eq!(
            c.endpoint(&["repos", "team", "app"], &[]).as_str(),
            "https://ghe.example.com/api/v3/repos/team/app"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let c = client(DEFAULT_API_URL);
        let url = c.endpoint(&["repos", "u", "r", "contents", "my file#1.js"], &[]);
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/u/r/contents/my%20file%231.js"
        );
    }

    #[test]
    fn test_endpoint_with_ref() {
        let c = client(DEFAULT_API_URL);
        let url = c.endpoint(
            &["repos", "u", "r", "contents", "src", "app.vue"],
            &[("ref", "feature/x")],
        );
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/u/r/contents/src/app.vue?ref=feature%2Fx"
        );
    }

    #[test]
    fn test_invalid_api_url() {
        let result = GithubClient::new(GithubConfig {
            api_url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::InvalidUrl(_))));

        let result = GithubClient::new(GithubConfig {
            api_url: "mailto:someone@example.com".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_invalid_token() {
        let result = GithubClient::new(GithubConfig {
            token: Some("bad\ntoken".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::InvalidToken)));
    }

    #[test]
    fn test_languages_keep_order() {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(r#"{"Vue": 5000, "JavaScript": 1200, "CSS": 30}"#).unwrap();
        let languages = languages_from_map(map);
        let names: Vec<_> = languages.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Vue", "JavaScript", "CSS"]);
        assert_eq!(languages[0].bytes, 5000);
    }
}
