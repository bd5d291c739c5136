//! Where scanned files come from
//!
//! A [`ContentSource`] lists the files of a tree and reads them one at a
//! time. Three sources are provided:
//!
//! - [`LocalSource`]: a directory on disk, honouring `.gitignore`
//! - [`GithubSource`]: a repository fetched through the GitHub REST API
//! - [`MemorySource`]: files held in memory

mod github;
mod local;
mod memory;

pub use github::GithubSource;
pub use local::LocalSource;
pub use memory::MemorySource;

use serde::Serialize;

use crate::error::Result;

/// A file listed by a [`ContentSource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// `/`-separated path relative to the root of the source
    pub path: String,
    /// Size in bytes, when the source knows it without reading the file
    pub size: Option<u64>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Last component of the path.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Lowercase suffix after the last `.` of the file name, without the dot.
    ///
    /// Returns an empty string when the name has no dot.
    ///
    /// # Examples
    ///
    /// ```
    /// use commentscan::source::SourceFile;
    ///
    /// assert_eq!(SourceFile::new("src/App.VUE", None).extension(), "vue");
    /// assert_eq!(SourceFile::new("lib/archive.tar.gz", None).extension(), "gz");
    /// assert_eq!(SourceFile::new("Makefile", None).extension(), "");
    /// ```
    pub fn extension(&self) -> String {
        self.file_name()
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default()
    }
}

/// A tree of files that can be scanned for comments.
pub trait ContentSource: Sync {
    /// Human-readable name of the tree, such as a directory or `user/repo`.
    fn label(&self) -> String;

    /// Every file of the tree. Directories are not listed.
    fn list_files(&self) -> Result<Vec<SourceFile>>;

    /// Read one listed file as text.
    fn read_file(&self, file: &SourceFile) -> Result<String>;
}
