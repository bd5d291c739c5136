//! In-memory files

use std::collections::BTreeMap;

use super::{ContentSource, SourceFile};
use crate::error::{Error, Result};

/// Files held in memory, listed in path order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    label: String,
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            files: BTreeMap::new(),
        }
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl ContentSource for MemorySource {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn list_files(&self) -> Result<Vec<SourceFile>> {
        Ok(self
            .files
            .iter()
            .map(|(path, content)| SourceFile::new(path.clone(), Some(content.len() as u64)))
            .collect())
    }

    fn read_file(&self, file: &SourceFile) -> Result<String> {
        self.files.get(&file.path).cloned().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", file.path),
            ))
        })
    }
}
