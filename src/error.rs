//! Error type shared by the GitHub client, content sources and scanner.
//!
//! Comment detection itself never fails; errors only come from fetching or
//! reading the files to scan.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("invalid API URL '{0}'")]
    InvalidUrl(String),

    #[error("GitHub token contains characters not allowed in a header")]
    InvalidToken,

    #[error("unsupported content encoding '{0}'")]
    Encoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid route '{0}'")]
    InvalidRoute(String),

    #[error("no default branch for {0}")]
    NoBranch(String),
}

pub type Result<T> = std::result::Result<T, Error>;
