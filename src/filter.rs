//! File ignore list
//!
//! Files that never contain readable comments (images, design files,
//! lockfiles) are skipped before they are fetched. Entries are either exact
//! file names or `*`-prefixed suffixes such as `*.png`.

use glob::Pattern;

/// Built-in ignore entries.
pub const DEFAULT_IGNORED_FILES: &[&str] = &[
    "package-lock.json",
    "*.jpg",
    "*.jpeg",
    "*.png",
    "*.gif",
    "*.webp",
    "*.tiff",
    "*.psd",
    "*.pdf",
    "*.eps",
    "*.ai",
    "*.indd",
    "*.raw",
];

/// Check a file name against the built-in ignore entries.
///
/// A plain entry must equal `file_name`; a `*`-prefixed entry matches any
/// name ending with the rest of the entry. Matching is case-sensitive.
///
/// # Examples
///
/// ```
/// use commentscan::filter::should_ignore_file;
///
/// assert!(should_ignore_file("package-lock.json"));
/// assert!(should_ignore_file("logo.png"));
/// assert!(!should_ignore_file("logo.PNG"));
/// assert!(!should_ignore_file("main.js"));
/// ```
pub fn should_ignore_file(file_name: &str) -> bool {
    matches_entries(DEFAULT_IGNORED_FILES, file_name)
}

fn matches_entries(entries: &[&str], file_name: &str) -> bool {
    if entries.contains(&file_name) {
        return true;
    }
    entries
        .iter()
        .filter_map(|entry| entry.strip_prefix('*'))
        .any(|suffix| file_name.ends_with(suffix))
}

/// Match a glob pattern against a name.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}

/// The built-in entries plus user-supplied glob patterns.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    patterns: Vec<String>,
}

impl IgnoreList {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Check whether a file at `path` (a `/`-separated relative path) should
    /// be skipped.
    ///
    /// The built-in entries and user patterns are tested against the file
    /// name. Anything under a `.git` directory is always skipped.
    pub fn is_ignored(&self, path: &str) -> bool {
        if path.split('/').any(|component| component == ".git") {
            return true;
        }

        let name = path.rsplit('/').next().unwrap_or(path);
        if should_ignore_file(name) {
            return true;
        }

        self.patterns
            .iter()
            .any(|pattern| name == pattern || glob_match(pattern, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_entry() {
        assert!(should_ignore_file("package-lock.json"));
        assert!(!should_ignore_file("package.json"));
        assert!(!should_ignore_file("my-package-lock.json.bak"));
    }

    #[test]
    fn test_wildcard_entries_are_suffixes() {
        assert!(should_ignore_file("photo.jpg"));
        assert!(should_ignore_file("photo.jpeg"));
        assert!(should_ignore_file("deck.pdf"));
        assert!(should_ignore_file("design.ai"));
        assert!(should_ignore_file("archive.tar.raw"));
        assert!(!should_ignore_file("png"));
        assert!(!should_ignore_file("icon.svg"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!should_ignore_file("PHOTO.JPG"));
    }

    #[test]
    fn test_ignore_list_uses_file_name() {
        let list = IgnoreList::default();
        assert!(list.is_ignored("assets/img/logo.png"));
        assert!(list.is_ignored("frontend/package-lock.json"));
        assert!(!list.is_ignored("src/main.js"));
    }

    #[test]
    fn test_ignore_list_skips_git_dir() {
        let list = IgnoreList::default();
        assert!(list.is_ignored(".git/config"));
        assert!(list.is_ignored("vendor/.git/HEAD"));
        assert!(!list.is_ignored("src/.gitkeep"));
    }

    #[test]
    fn test_ignore_list_user_patterns() {
        let list = IgnoreList::new(vec!["*.min.js".to_string(), "LICENSE".to_string()]);
        assert!(list.is_ignored("dist/app.min.js"));
        assert!(list.is_ignored("LICENSE"));
        assert!(!list.is_ignored("src/app.js"));
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("*.rs", "main.rs"));
        assert!(!glob_match("*.rs", "main.py"));
        assert!(glob_match("test?.js", "test1.js"));
        assert!(!glob_match("test?.js", "test12.js"));
        assert!(glob_match("[abc].txt", "a.txt"));
        assert!(!glob_match("[", "["));
    }
}
