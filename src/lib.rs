//! Commentscan - find comments in source files, locally or across GitHub repositories
//!
//! The core is [`detect_comments`], which picks a set of regex rules by file
//! extension and returns every comment it matches. The rest of the crate feeds
//! it files from a directory or a GitHub repository and reports the results.

pub mod comments;
pub mod error;
pub mod filter;
pub mod github;
pub mod output;
pub mod query;
pub mod route;
pub mod rules;
pub mod scan;
pub mod source;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use comments::{DEFAULT_RULE_SET, RuleSet, detect_comments, rule_set_for};
pub use error::{Error, Result};
pub use filter::{IgnoreList, should_ignore_file};
pub use github::{GithubClient, GithubConfig};
pub use output::{OutputConfig, print_json};
pub use query::SearchQuery;
pub use route::Route;
pub use rules::CommentRule;
pub use scan::{FileComments, ScanConfig, ScanReport, Scanner};
pub use source::{ContentSource, GithubSource, LocalSource, MemorySource, SourceFile};
