//! Bold, italic and strikethrough.
//!
//! These stages run after the global escape, so bodies are inserted as-is.
//! Bold must run before italic or `**x**` would be read as two empty italics.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::placeholder::PlaceholderTable;

static BOLD_STAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BOLD_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(.+?)__").unwrap());
static ITALIC_STAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static ITALIC_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_(.+?)_").unwrap());
static STRIKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());

fn wrap(re: &Regex, tag: &str, text: &str, table: &mut PlaceholderTable) -> String {
    re.replace_all(text, |caps: &Captures<'_>| {
        table.store(format!("<{tag}>{}</{tag}>", &caps[1]))
    })
    .into_owned()
}

pub(crate) fn bold_star(text: &str, table: &mut PlaceholderTable) -> String {
    wrap(&BOLD_STAR_RE, "strong", text, table)
}

pub(crate) fn bold_underscore(text: &str, table: &mut PlaceholderTable) -> String {
    wrap(&BOLD_UNDERSCORE_RE, "strong", text, table)
}

pub(crate) fn italic_star(text: &str, table: &mut PlaceholderTable) -> String {
    wrap(&ITALIC_STAR_RE, "em", text, table)
}

pub(crate) fn italic_underscore(text: &str, table: &mut PlaceholderTable) -> String {
    wrap(&ITALIC_UNDERSCORE_RE, "em", text, table)
}

pub(crate) fn strikethrough(text: &str, table: &mut PlaceholderTable) -> String {
    wrap(&STRIKE_RE, "del", text, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(input: &str) -> String {
        let mut table = PlaceholderTable::new();
        let mut text = input.to_owned();
        for stage in [
            bold_star,
            bold_underscore,
            italic_star,
            italic_underscore,
            strikethrough,
        ] {
            text = stage(&text, &mut table);
        }
        table.resolve(&text).html
    }

    #[test]
    fn test_bold() {
        assert_eq!(run("**a** and __b__"), "<strong>a</strong> and <strong>b</strong>");
    }

    #[test]
    fn test_italic() {
        assert_eq!(run("*a* and _b_"), "<em>a</em> and <em>b</em>");
    }

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(run("**x**"), "<strong>x</strong>");
        assert_eq!(
            run("**bold** then *it*"),
            "<strong>bold</strong> then <em>it</em>"
        );
    }

    #[test]
    fn test_fragment_body_is_opaque() {
        // The bold body is stored before the italic stage runs.
        assert_eq!(run("**a *b* c**"), "<strong>a *b* c</strong>");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(run("~~gone~~"), "<del>gone</del>");
    }

    #[test]
    fn test_non_greedy() {
        assert_eq!(run("*a* b *c*"), "<em>a</em> b <em>c</em>");
    }

    #[test]
    fn test_unmatched_markers_stay_literal() {
        assert_eq!(run("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(run("~~open"), "~~open");
    }

    #[test]
    fn test_does_not_cross_lines() {
        assert_eq!(run("*a\nb*"), "*a\nb*");
    }

    #[test]
    fn test_body_not_reescaped() {
        assert_eq!(run("**a &amp; b**"), "<strong>a &amp; b</strong>");
    }
}
