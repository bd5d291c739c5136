//! Comment detection
//!
//! Maps a file extension to an ordered set of [`CommentRule`]s and collects
//! every match those rules find in a piece of source text.
//!
//! # Supported Extensions
//!
//! | Extension | Rules, in order |
//! |-----------|-----------------|
//! | `js`, `json`, `cjs` | `line-comment`, `block-comment` |
//! | `jsx` | `templated-markup` |
//! | `vue` | `line-comment`, `block-comment`, `html-markup` |
//! | `html` | `html-markup` |
//! | `css`, `scss` | `block-comment` |
//! | `py` | `hash`, `triple-quoted` |
//! | `php` | `hash`, `line-comment`, `block-comment` |
//!
//! Any other extension, including a differently-cased one such as `JS`,
//! falls back to [`DEFAULT_RULE_SET`], which applies every rule.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::rules::CommentRule;

/// An ordered collection of rules applied to one kind of file.
///
/// Rule names are unique within a set. The order of the rules is the order in
/// which their matches appear in the output of [`detect_comments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rules: &'static [CommentRule],
}

impl RuleSet {
    pub const fn new(rules: &'static [CommentRule]) -> Self {
        Self { rules }
    }

    /// Rule names in application order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Apply every rule to `code`, concatenating their matches rule by rule.
    pub fn apply(&self, code: &str) -> Vec<String> {
        let mut comments = Vec::new();
        for rule in self.rules {
            comments.extend(rule.find_all(code).map(str::to_string));
        }
        comments
    }
}

const SLASH_STYLE: RuleSet = RuleSet::new(&[CommentRule::LineComment, CommentRule::BlockComment]);

/// Rule set used for extensions missing from the registry: every rule.
pub const DEFAULT_RULE_SET: RuleSet = RuleSet::new(&CommentRule::ALL);

static REGISTRY: LazyLock<HashMap<&'static str, RuleSet>> = LazyLock::new(|| {
    HashMap::from([
        ("js", SLASH_STYLE),
        ("jsx", RuleSet::new(&[CommentRule::TemplatedMarkup])),
        (
            "vue",
            RuleSet::new(&[
                CommentRule::LineComment,
                CommentRule::BlockComment,
                CommentRule::HtmlMarkup,
            ]),
        ),
        ("json", SLASH_STYLE),
        ("cjs", SLASH_STYLE),
        ("html", RuleSet::new(&[CommentRule::HtmlMarkup])),
        ("css", RuleSet::new(&[CommentRule::BlockComment])),
        ("scss", RuleSet::new(&[CommentRule::BlockComment])),
        ("py", RuleSet::new(&[CommentRule::Hash, CommentRule::TripleQuoted])),
        (
            "php",
            RuleSet::new(&[
                CommentRule::Hash,
                CommentRule::LineComment,
                CommentRule::BlockComment,
            ]),
        ),
    ])
});

/// The registered rule set for `extension`, if any.
///
/// Lookup is an exact, case-sensitive key match; `".js"` and `"JS"` are not
/// registered.
pub fn registered_rule_set(extension: &str) -> Option<&'static RuleSet> {
    REGISTRY.get(extension)
}

/// The rule set [`detect_comments`] uses for `extension`.
pub fn rule_set_for(extension: &str) -> &'static RuleSet {
    registered_rule_set(extension).unwrap_or(&DEFAULT_RULE_SET)
}

/// Extensions with a dedicated rule set, sorted.
pub fn registered_extensions() -> Vec<&'static str> {
    let mut extensions: Vec<_> = REGISTRY.keys().copied().collect();
    extensions.sort_unstable();
    extensions
}

/// Extract comment-like substrings from `code`.
///
/// Each rule of the extension's rule set is applied in order; all matches of
/// one rule (left to right, trimmed) come before any match of the next rule.
/// Returns an empty vector when nothing matches. This never fails: an
/// unrecognized extension uses [`DEFAULT_RULE_SET`].
///
/// # Examples
///
/// ```
/// use commentscan::detect_comments;
///
/// assert_eq!(detect_comments("// hello\nconst x = 1", "js"), vec!["// hello"]);
/// assert_eq!(detect_comments("# a comment\nprint(1)", "py"), vec!["# a comment"]);
/// assert!(detect_comments("", "js").is_empty());
/// ```
pub fn detect_comments(code: &str, extension: &str) -> Vec<String> {
    // A leading byte-order mark counts as start of text
    let code = code.strip_prefix('\u{FEFF}').unwrap_or(code);
    rule_set_for(extension).apply(code)
}
