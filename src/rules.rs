//! Comment rules
//!
//! Each rule pairs one comment syntax with the regex that finds it. Rules are
//! plain pattern matchers: they do not know about string literals, so a `//`
//! inside `"http://..."` preceded by whitespace counts as a line comment.
//!
//! | Rule | Syntax |
//! |------|--------|
//! | `line-comment` | `// ...` to end of line |
//! | `block-comment` | `/* ... */`, may span lines |
//! | `templated-markup` | `{ /* ... */ }`, as used in JSX |
//! | `hash` | `# ...` lines |
//! | `triple-quoted` | `"""..."""`, may span lines |
//! | `html-markup` | `<!-- ... -->` lines |

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// `//` preceded by start of text or whitespace, then the rest of the line.
/// CRLF mode keeps `.` from swallowing a trailing `\r`.
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?R)(?:\s|^)//\s*(.+)").expect("LINE_COMMENT regex is invalid")
});

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\*([\s\S]*?)\*/").expect("BLOCK_COMMENT regex is invalid")
});

/// A brace pair whose only content is a block comment: `{/* ... */}`.
static TEMPLATED_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(\s*/\*[\s\S]*?\*/\s*)\}").expect("TEMPLATED_MARKUP regex is invalid")
});

static HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^\s*#(.*)$").expect("HASH regex is invalid"));

static TRIPLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""""([\s\S]*?)""""#).expect("TRIPLE_QUOTED regex is invalid")
});

static HTML_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)^\s*<!--\s*([\s\S]*?)\s*-->\s*$").expect("HTML_MARKUP regex is invalid")
});

/// A single comment syntax and the pattern that recognizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentRule {
    /// `// comment`
    LineComment,
    /// `/* comment */`
    BlockComment,
    /// `{ /* comment */ }`
    TemplatedMarkup,
    /// `# comment`
    Hash,
    /// `""" comment """`
    TripleQuoted,
    /// `<!-- comment -->`
    HtmlMarkup,
}

impl CommentRule {
    /// Every rule, in the order the default rule set applies them.
    pub const ALL: [CommentRule; 6] = [
        CommentRule::LineComment,
        CommentRule::BlockComment,
        CommentRule::TemplatedMarkup,
        CommentRule::Hash,
        CommentRule::TripleQuoted,
        CommentRule::HtmlMarkup,
    ];

    /// Stable name of the rule, unique within a rule set.
    pub fn name(&self) -> &'static str {
        match self {
            CommentRule::LineComment => "line-comment",
            CommentRule::BlockComment => "block-comment",
            CommentRule::TemplatedMarkup => "templated-markup",
            CommentRule::Hash => "hash",
            CommentRule::TripleQuoted => "triple-quoted",
            CommentRule::HtmlMarkup => "html-markup",
        }
    }

    /// The compiled pattern backing this rule.
    pub fn pattern(&self) -> &'static Regex {
        match self {
            CommentRule::LineComment => &LINE_COMMENT,
            CommentRule::BlockComment => &BLOCK_COMMENT,
            CommentRule::TemplatedMarkup => &TEMPLATED_MARKUP,
            CommentRule::Hash => &HASH,
            CommentRule::TripleQuoted => &TRIPLE_QUOTED,
            CommentRule::HtmlMarkup => &HTML_MARKUP,
        }
    }

    /// All non-overlapping matches in `text`, left to right, each trimmed.
    pub fn find_all<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.pattern().find_iter(text).map(|m| m.as_str().trim())
    }
}

impl fmt::Display for CommentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(rule: CommentRule, text: &str) -> Vec<&str> {
        rule.find_all(text).collect()
    }

    #[test]
    fn test_line_comment_at_start() {
        assert_eq!(
            matches(CommentRule::LineComment, "// hello\nconst x = 1"),
            vec!["// hello"]
        );
    }

    #[test]
    fn test_line_comment_needs_leading_whitespace() {
        // `http://` has no whitespace before the slashes
        assert!(matches(CommentRule::LineComment, "const url = 'http://example.com'").is_empty());
        assert_eq!(
            matches(CommentRule::LineComment, "let x = 1; // trailing"),
            vec!["// trailing"]
        );
    }

    #[test]
    fn test_line_comment_strips_carriage_return() {
        assert_eq!(
            matches(CommentRule::LineComment, "// one\r\n// two\r\n"),
            vec!["// one", "// two"]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        assert_eq!(
            matches(CommentRule::BlockComment, "/* a\nb */ x /* c */"),
            vec!["/* a\nb */", "/* c */"]
        );
    }

    #[test]
    fn test_block_comment_is_not_greedy() {
        assert_eq!(
            matches(CommentRule::BlockComment, "/* a */ code /* b */"),
            vec!["/* a */", "/* b */"]
        );
    }

    #[test]
    fn test_templated_markup() {
        assert_eq!(
            matches(CommentRule::TemplatedMarkup, "<div>{ /* note */ }</div>"),
            vec!["{ /* note */ }"]
        );
        assert!(matches(CommentRule::TemplatedMarkup, "{ value }").is_empty());
    }

    #[test]
    fn test_hash_per_line() {
        assert_eq!(
            matches(CommentRule::Hash, "# one\nx = 1\n    # two\n"),
            vec!["# one", "# two"]
        );
    }

    #[test]
    fn test_hash_crlf() {
        assert_eq!(matches(CommentRule::Hash, "# a\r\nb\r\n"), vec!["# a"]);
    }

    #[test]
    fn test_triple_quoted() {
        assert_eq!(
            matches(CommentRule::TripleQuoted, "\"\"\"doc\nmore\"\"\"\nx = 1"),
            vec!["\"\"\"doc\nmore\"\"\""]
        );
    }

    #[test]
    fn test_html_markup_whole_line_only() {
        assert_eq!(
            matches(CommentRule::HtmlMarkup, "<!-- note -->\n<div></div>"),
            vec!["<!-- note -->"]
        );
        assert!(matches(CommentRule::HtmlMarkup, "<p>text</p> <!-- inline -->").is_empty());
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = CommentRule::ALL.iter().map(|rule| rule.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CommentRule::ALL.len());
    }
}
