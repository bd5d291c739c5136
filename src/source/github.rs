//! Repository on GitHub

use tracing::debug;

use super::{ContentSource, SourceFile};
use crate::error::{Error, Result};
use crate::github::{GithubClient, TreeEntry};

/// Files of one GitHub repository, listed from its recursive git tree and
/// read through the contents endpoint.
#[derive(Debug, Clone)]
pub struct GithubSource {
    client: GithubClient,
    user: String,
    repo: String,
    branch: Option<String>,
}

impl GithubSource {
    /// Scan the repository's default branch.
    pub fn new(client: GithubClient, user: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            user: user.into(),
            repo: repo.into(),
            branch: None,
        }
    }

    /// Scan a specific branch, tag or commit.
    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    fn resolve_branch(&self) -> Result<String> {
        if let Some(branch) = &self.branch {
            return Ok(branch.clone());
        }
        let repository = self.client.fetch_repository(&self.user, &self.repo)?;
        repository
            .default_branch
            .ok_or_else(|| Error::NoBranch(format!("{}/{}", self.user, self.repo)))
    }
}

/// Blob entries of a tree as source files.
pub(crate) fn files_from_tree(entries: Vec<TreeEntry>) -> Vec<SourceFile> {
    entries
        .into_iter()
        .filter(TreeEntry::is_file)
        .map(|entry| SourceFile::new(entry.path, entry.size))
        .collect()
}

impl ContentSource for GithubSource {
    fn label(&self) -> String {
        format!("{}/{}", self.user, self.repo)
    }

    fn list_files(&self) -> Result<Vec<SourceFile>> {
        let branch = self.resolve_branch()?;
        debug!("listing {}/{} at {}", self.user, self.repo, branch);
        let tree = self
            .client
            .fetch_repository_tree(&self.user, &self.repo, &branch)?;
        Ok(files_from_tree(tree))
    }

    fn read_file(&self, file: &SourceFile) -> Result<String> {
        let content = match &self.branch {
            Some(branch) => self.client.fetch_repository_content_at(
                &self.user,
                &self.repo,
                &file.path,
                branch,
            )?,
            None => self
                .client
                .fetch_repository_content(&self.user, &self.repo, &file.path)?,
        };
        content.decoded()
    }
}
