//! Directory on disk

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use super::{ContentSource, SourceFile};
use crate::error::Result;

/// Files under a local directory.
///
/// Hidden files and anything matched by `.gitignore` are skipped unless
/// `show_all` is set.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
    show_all: bool,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            show_all: false,
        }
    }

    /// Include hidden and gitignored files.
    pub fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }
}

impl ContentSource for LocalSource {
    fn label(&self) -> String {
        self.root.display().to_string()
    }

    fn list_files(&self) -> Result<Vec<SourceFile>> {
        // Surface a missing root as an error instead of an empty listing
        fs::metadata(&self.root)?;

        let filtered = !self.show_all;
        let walker = WalkBuilder::new(&self.root)
            .hidden(filtered)
            .ignore(filtered)
            .git_ignore(filtered)
            .git_global(filtered)
            .git_exclude(filtered)
            .follow_links(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if let Some(path) = self.relative_path(entry.path()) {
                let size = entry.metadata().ok().map(|m| m.len());
                files.push(SourceFile::new(path, size));
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    /// Invalid UTF-8 is replaced rather than rejected, as for GitHub content.
    fn read_file(&self, file: &SourceFile) -> Result<String> {
        let bytes = fs::read(self.root.join(&file.path))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
