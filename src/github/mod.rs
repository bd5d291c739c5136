//! GitHub REST API access
//!
//! - `GithubClient`: blocking client for users, repositories, trees, contents and languages
//! - Response types deserialized with serde

mod client;
mod types;

pub use client::{DEFAULT_API_URL, DEFAULT_TIMEOUT, GithubClient, GithubConfig};
pub use types::{FileContent, LanguageShare, Repository, TreeEntry, TreeEntryKind, User};
