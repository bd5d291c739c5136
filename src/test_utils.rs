//! Test utilities for creating temporary source trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A temporary directory of source files, optionally a git repository.
///
/// `.gitignore` files only take effect inside a git repository, so tests of
/// ignore handling should use [`TestRepo::with_git`].
/// The directory is automatically cleaned up when dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create a new temporary directory with git initialized.
    pub fn with_git() -> Self {
        let repo = Self::new();
        Command::new("git")
            .args(["init", "--quiet"])
            .current_dir(repo.path())
            .output()
            .expect("Failed to init git");
        repo
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write `count` JavaScript files, each with a line and a block comment.
    pub fn add_js_files(&self, count: usize) {
        for i in 0..count {
            self.add_file(
                &format!("src/dir{}/file{}.js", i % 10, i),
                &format!("// TODO: file {}\nconst x = {}; /* value */\n", i, i),
            );
        }
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
