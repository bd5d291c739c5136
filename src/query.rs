//! Search query matching

use serde::Serialize;

/// The text a user is searching for inside comments.
///
/// An empty query matches every comment. Otherwise matching is a
/// case-insensitive substring test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchQuery {
    text: String,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn matches(&self, comment: &str) -> bool {
        self.is_empty() || self.find(comment).is_some()
    }

    /// Byte range of the first occurrence of the query in `comment`.
    ///
    /// Returns `None` for an empty query. The range always lies on char
    /// boundaries of `comment`.
    pub fn find(&self, comment: &str) -> Option<(usize, usize)> {
        if self.is_empty() {
            return None;
        }
        let needle: Vec<char> = self.text.chars().flat_map(char::to_lowercase).collect();
        comment
            .char_indices()
            .find_map(|(start, _)| {
                match_at(&comment[start..], &needle).map(|len| (start, start + len))
            })
    }

    /// Keep the comments matching this query, in order.
    pub fn filter(&self, comments: Vec<String>) -> Vec<String> {
        if self.is_empty() {
            return comments;
        }
        comments.into_iter().filter(|c| self.matches(c)).collect()
    }
}

/// Byte length of the prefix of `haystack` equal to `needle` ignoring case.
fn match_at(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, c) in haystack.char_indices() {
        for lower in c.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(offset + c.len_utf8());
        }
    }
    None
}

impl From<&str> for SearchQuery {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches_everything() {
        let query = SearchQuery::default();
        assert!(query.matches("// anything"));
        assert!(query.matches(""));
        assert_eq!(query.find("// anything"), None);
    }

    #[test]
    fn test_case_insensitive_match() {
        let query = SearchQuery::new("todo");
        assert!(query.matches("// TODO: fix"));
        assert!(query.matches("# ToDo later"));
        assert!(!query.matches("// done"));
    }

    #[test]
    fn test_find_returns_byte_range() {
        let query = SearchQuery::new("fix");
        assert_eq!(query.find("// TODO: FIX me"), Some((9, 12)));
        assert_eq!(query.find("// nothing"), None);
    }

    #[test]
    fn test_find_with_multibyte_text() {
        let query = SearchQuery::new("über");
        let comment = "// Grüße ÜBER alles";
        let (start, end) = query.find(comment).unwrap();
        assert_eq!(&comment[start..end], "ÜBER");
    }

    #[test]
    fn test_filter_keeps_order() {
        let query = SearchQuery::new("x");
        let comments = vec![
            "// x one".to_string(),
            "// skip".to_string(),
            "/* X two */".to_string(),
        ];
        assert_eq!(query.filter(comments), vec!["// x one", "/* X two */"]);
    }
}
