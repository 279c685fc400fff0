//! Placeholder table and fixed-point resolution.
//!
//! Stages move finished markup out of the working text and leave an opaque
//! `{{HTML-<n>}}` token behind. Later stages never see the markup, so it cannot
//! be escaped twice or re-interpreted as markdown. [`PlaceholderTable::resolve`]
//! splices the fragments back in once the pipeline is done.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches a placeholder token and captures its index.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{HTML-(\d+)\}\}").unwrap());

/// Upper bound on resolution passes.
///
/// Fragments may contain tokens of earlier fragments (a bold span around a code
/// span), so one pass is not always enough. The stage ordering keeps nesting
/// acyclic; the cap only guards against hand-built cycles.
pub const MAX_RESOLVE_PASSES: usize = 10;

/// Opening of every token.
const TOKEN_PREFIX: &str = "{{HTML-";

/// Stand-in for [`TOKEN_PREFIX`] while user text travels through the stages.
///
/// Starts with a private-use character: [`TOKEN_RE`] cannot match it and HTML
/// escaping leaves it alone.
const LITERAL_PREFIX: &str = "\u{E000}HTML-";

/// Result of [`PlaceholderTable::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Text with tokens substituted.
    pub html: String,
    /// Number of substitution passes that changed the text.
    pub passes: usize,
    /// Whether tokens were still present when resolution stopped.
    pub unresolved: bool,
}

/// Append-only arena of HTML fragments addressed by index.
///
/// Indices start at 0, increase strictly and are never reused. A fragment is
/// immutable once stored and may itself contain tokens of earlier fragments.
#[derive(Debug, Default)]
pub struct PlaceholderTable {
    fragments: Vec<String>,
}

impl PlaceholderTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finished fragment and return its token.
    pub fn store(&mut self, html: impl Into<String>) -> String {
        let index = self.fragments.len();
        self.fragments.push(html.into());
        token(index)
    }

    /// Fragment stored under `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fragments.get(index).map(String::as_str)
    }

    /// Number of stored fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether no fragment has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Substitute tokens with their fragments until none remain.
    ///
    /// Stops after [`MAX_RESOLVE_PASSES`] passes. Tokens that are still present
    /// then, or that name an index outside the table, stay in the output as
    /// literal text.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Resolution {
        let mut html = text.to_owned();
        let mut passes = 0;

        while passes < MAX_RESOLVE_PASSES && TOKEN_RE.is_match(&html) {
            let next = TOKEN_RE
                .replace_all(&html, |caps: &Captures<'_>| self.lookup(caps))
                .into_owned();
            if next == html {
                // Only unknown indices left; further passes cannot change anything.
                break;
            }
            html = next;
            passes += 1;
        }

        let unresolved = TOKEN_RE.is_match(&html);
        Resolution {
            html,
            passes,
            unresolved,
        }
    }

    fn lookup(&self, caps: &Captures<'_>) -> String {
        caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|index| self.get(index))
            .map_or_else(|| caps[0].to_owned(), str::to_owned)
    }
}

/// Token text for a fragment index.
#[must_use]
pub fn token(index: usize) -> String {
    format!("{{{{HTML-{index}}}}}")
}

/// Whether `text` contains any placeholder token.
#[must_use]
pub fn has_token(text: &str) -> bool {
    TOKEN_RE.is_match(text)
}

/// Replace token-like text in user input so no stage or the resolver can
/// mistake it for a real token.
///
/// Undo with [`restore_literal_tokens`] after resolution.
#[must_use]
pub(crate) fn protect_literal_tokens(text: &str) -> String {
    text.replace(TOKEN_PREFIX, LITERAL_PREFIX)
}

/// Turn protected token-like text back into what the user wrote.
#[must_use]
pub(crate) fn restore_literal_tokens(html: &str) -> String {
    html.replace(LITERAL_PREFIX, TOKEN_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_format() {
        assert_eq!(token(0), "{{HTML-0}}");
        assert_eq!(token(42), "{{HTML-42}}");
    }

    #[test]
    fn test_indices_are_sequential() {
        let mut table = PlaceholderTable::new();
        assert_eq!(table.store("<em>a</em>"), "{{HTML-0}}");
        assert_eq!(table.store("<hr/>"), "{{HTML-1}}");
        assert_eq!(table.store("<em>b</em>"), "{{HTML-2}}");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1), Some("<hr/>"));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn test_resolve_single_pass() {
        let mut table = PlaceholderTable::new();
        let t = table.store("<strong>x</strong>");
        let resolution = table.resolve(&format!("a {t} b"));

        assert_eq!(resolution.html, "a <strong>x</strong> b");
        assert_eq!(resolution.passes, 1);
        assert!(!resolution.unresolved);
    }

    #[test]
    fn test_resolve_nested_fragments() {
        let mut table = PlaceholderTable::new();
        let code = table.store("<code>c</code>");
        let bold = table.store(format!("<strong>{code}</strong>"));
        let resolution = table.resolve(&bold);

        assert_eq!(resolution.html, "<strong><code>c</code></strong>");
        assert_eq!(resolution.passes, 2);
        assert!(!resolution.unresolved);
    }

    #[test]
    fn test_resolve_without_tokens() {
        let table = PlaceholderTable::new();
        let resolution = table.resolve("plain");
        assert_eq!(resolution.html, "plain");
        assert_eq!(resolution.passes, 0);
    }

    #[test]
    fn test_unknown_index_left_literal() {
        let table = PlaceholderTable::new();
        let resolution = table.resolve("keep {{HTML-7}} here");
        assert_eq!(resolution.html, "keep {{HTML-7}} here");
        assert!(resolution.unresolved);
    }

    #[test]
    fn test_cycle_stops_at_cap() {
        let mut table = PlaceholderTable::new();
        // Fragment 0 refers to itself.
        table.store("[{{HTML-0}}]");
        let resolution = table.resolve("{{HTML-0}}");

        assert_eq!(resolution.passes, MAX_RESOLVE_PASSES);
        assert!(resolution.unresolved);
        assert!(resolution.html.contains("{{HTML-0}}"));
        assert!(resolution.html.starts_with("[[[[[[[[[["));
    }

    #[test]
    fn test_has_token() {
        assert!(has_token("a {{HTML-3}} b"));
        assert!(!has_token("a {{HTML-}} b"));
        assert!(!has_token("{HTML-3}"));
    }

    #[test]
    fn test_protected_literal_survives_resolution() {
        let mut table = PlaceholderTable::new();
        table.store("<strong>x</strong>");
        let protected = protect_literal_tokens("show {{HTML-0}} as is");

        assert!(!has_token(&protected));
        let resolution = table.resolve(&protected);
        assert_eq!(resolution.passes, 0);
        assert!(!resolution.unresolved);
        assert_eq!(restore_literal_tokens(&resolution.html), "show {{HTML-0}} as is");
    }

    #[test]
    fn test_protected_literal_is_untouched_by_escaping() {
        let protected = protect_literal_tokens("<{{HTML-1}}>");
        let escaped = crate::escape::escape_html(&protected);
        assert_eq!(restore_literal_tokens(&escaped), "&lt;{{HTML-1}}&gt;");
    }
}
