//! GitHub REST API response types
//!
//! Only the fields this tool reads are modelled; unknown fields are ignored.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// `GET /users/{user}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub html_url: String,
}

/// `GET /repos/{user}/{repo}` and the entries of `GET /users/{user}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Object type of a git tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeEntryKind {
    Blob,
    Tree,
    /// A submodule
    Commit,
    #[serde(other)]
    Other,
}

/// One entry of `GET /repos/{user}/{repo}/git/trees/{branch}?recursive=1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(default)]
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: TreeEntryKind,
    #[serde(default)]
    pub sha: String,
    /// Only present for blobs
    #[serde(default)]
    pub size: Option<u64>,
}

impl TreeEntry {
    pub fn is_file(&self) -> bool {
        self.kind == TreeEntryKind::Blob
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeResponse {
    #[serde(default)]
    pub sha: String,
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

/// `GET /repos/{user}/{repo}/contents/{path}` for a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl FileContent {
    /// Decode the file body into text.
    ///
    /// GitHub sends base64 wrapped at 60 columns, so whitespace is stripped
    /// before decoding. Invalid UTF-8 is replaced rather than rejected.
    pub fn decoded(&self) -> Result<String> {
        let Some(content) = self.content.as_deref() else {
            return Ok(String::new());
        };

        match self.encoding.as_deref() {
            Some("base64") => {
                let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = STANDARD.decode(compact).map_err(|e| Error::Decode {
                    url: self.path.clone(),
                    message: e.to_string(),
                })?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Some("utf-8") | None => Ok(content.to_string()),
            Some(other) => Err(Error::Encoding(other.to_string())),
        }
    }
}

/// One row of `GET /repos/{user}/{repo}/languages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
}
