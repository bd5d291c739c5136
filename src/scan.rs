//! Scanning a tree of files for comments
//!
//! The scanner lists the files of a [`ContentSource`], drops ignored and
//! oversized ones, reads the rest in parallel, runs [`detect_comments`] on
//! each and keeps the comments matching the [`SearchQuery`].

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::comments::detect_comments;
use crate::error::Result;
use crate::filter::IgnoreList;
use crate::query::SearchQuery;
use crate::source::{ContentSource, SourceFile};

/// Default maximum file size for scanning (1MB).
/// Larger files are skipped without being read.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_000_000;

/// Configuration for a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub query: SearchQuery,
    pub ignore: IgnoreList,
    pub max_file_size: u64,
    /// Number of parallel workers for reading and scanning files.
    /// 0 = auto-detect (use all available cores)
    /// 1 = sequential (no parallelism)
    /// N = use N worker threads
    pub parallel_workers: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            query: SearchQuery::default(),
            ignore: IgnoreList::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            parallel_workers: 0,
        }
    }
}

/// Comments found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileComments {
    pub path: String,
    pub extension: String,
    pub comments: Vec<String>,
}

/// Result of scanning one source.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub source: String,
    pub query: SearchQuery,
    /// Files with at least one matching comment, sorted by path
    pub files: Vec<FileComments>,
    /// Files that were read and searched
    pub files_scanned: usize,
    /// Files ignored, too large, or unreadable
    pub files_skipped: usize,
}

impl ScanReport {
    pub fn comment_count(&self) -> usize {
        self.files.iter().map(|f| f.comments.len()).sum()
    }
}

enum FileOutcome {
    Scanned(Option<FileComments>),
    Unreadable,
}

pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan every file of `source`.
    ///
    /// Fails only if the source cannot be listed. Files that cannot be read
    /// are logged and counted as skipped.
    pub fn scan<S: ContentSource + ?Sized>(&self, source: &S) -> Result<ScanReport> {
        let label = source.label();
        info!("scanning {}", label);

        let listed = source.list_files()?;
        let total = listed.len();
        let candidates: Vec<SourceFile> = listed
            .into_iter()
            .filter(|file| self.should_scan(file))
            .collect();
        let mut files_skipped = total - candidates.len();

        let outcomes = self.map_files(&candidates, |file| self.scan_file(source, file));

        let mut files_scanned = 0;
        let mut files = Vec::new();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Scanned(found) => {
                    files_scanned += 1;
                    files.extend(found);
                }
                FileOutcome::Unreadable => files_skipped += 1,
            }
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));

        info!(
            "scanned {} files of {} ({} skipped), {} with matching comments",
            files_scanned,
            label,
            files_skipped,
            files.len()
        );

        Ok(ScanReport {
            source: label,
            query: self.config.query.clone(),
            files,
            files_scanned,
            files_skipped,
        })
    }

    fn should_scan(&self, file: &SourceFile) -> bool {
        if self.config.ignore.is_ignored(&file.path) {
            debug!("ignoring {}", file.path);
            return false;
        }
        if file.size.is_some_and(|size| size > self.config.max_file_size) {
            debug!("skipping {} (larger than {} bytes)", file.path, self.config.max_file_size);
            return false;
        }
        true
    }

    fn scan_file<S: ContentSource + ?Sized>(&self, source: &S, file: &SourceFile) -> FileOutcome {
        let content = match source.read_file(file) {
            Ok(content) => content,
            Err(e) => {
                warn!("skipping {}: {}", file.path, e);
                return FileOutcome::Unreadable;
            }
        };
        if content.len() as u64 > self.config.max_file_size {
            debug!("skipping {} after read (too large)", file.path);
            return FileOutcome::Unreadable;
        }

        let extension = file.extension();
        let comments = self.config.query.filter(detect_comments(&content, &extension));
        debug!("{}: {} matching comments", file.path, comments.len());

        FileOutcome::Scanned((!comments.is_empty()).then(|| FileComments {
            path: file.path.clone(),
            extension,
            comments,
        }))
    }

    /// Map `f` over `files`, honouring `parallel_workers`. Output order
    /// follows input order.
    fn map_files<T, F>(&self, files: &[SourceFile], f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&SourceFile) -> T + Sync + Send,
    {
        match self.config.parallel_workers {
            0 => files.par_iter().map(&f).collect(),
            1 => files.iter().map(&f).collect(),
            workers => match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => pool.install(|| files.par_iter().map(&f).collect()),
                Err(e) => {
                    // Fall back to rayon's global pool if custom pool creation fails
                    debug!("could not build a {} thread pool: {}", workers, e);
                    files.par_iter().map(&f).collect()
                }
            },
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}
