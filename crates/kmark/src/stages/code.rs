//! Fenced code blocks and inline code spans.
//!
//! Both stages run before the global escape, so their bodies are escaped here
//! exactly once and then hidden behind placeholders.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_html;
use crate::placeholder::PlaceholderTable;

/// Shortest span between two triple-backtick fences. An optional language
/// tag is only recognized when a newline follows it.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:([A-Za-z0-9_+#.\-]+)[ \t]*\n)?(.*?)```").unwrap());

/// Single-backtick span on one line.
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

pub(crate) fn fenced(text: &str, table: &mut PlaceholderTable) -> String {
    FENCE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let body = caps.get(2).map_or("", |m| m.as_str());
            let body = body.strip_prefix('\n').unwrap_or(body).trim_end_matches('\n');
            let html = match caps.get(1) {
                Some(lang) => format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    escape_html(lang.as_str()),
                    escape_html(body)
                ),
                None => format!("<pre><code>{}</code></pre>", escape_html(body)),
            };
            table.store(html)
        })
        .into_owned()
}

pub(crate) fn inline(text: &str, table: &mut PlaceholderTable) -> String {
    INLINE_CODE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            table.store(format!(
                "<code class=\"inline-code\">{}</code>",
                escape_html(&caps[1])
            ))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(stage: fn(&str, &mut PlaceholderTable) -> String, input: &str) -> String {
        let mut table = PlaceholderTable::new();
        let text = stage(input, &mut table);
        table.resolve(&text).html
    }

    #[test]
    fn test_fence_with_language() {
        assert_eq!(
            run(fenced, "```rust\nfn main() {}\n```"),
            "<pre><code class=\"language-rust\">fn main() {}</code></pre>"
        );
    }

    #[test]
    fn test_fence_without_language() {
        assert_eq!(
            run(fenced, "```\n<b>x</b>\n```"),
            "<pre><code>&lt;b&gt;x&lt;/b&gt;</code></pre>"
        );
    }

    #[test]
    fn test_fence_on_one_line() {
        assert_eq!(run(fenced, "```**x**```"), "<pre><code>**x**</code></pre>");
        // A bare word is body, not a language tag.
        assert_eq!(run(fenced, "```abc```"), "<pre><code>abc</code></pre>");
    }

    #[test]
    fn test_fence_is_non_greedy() {
        let mut table = PlaceholderTable::new();
        let text = fenced("```\na\n```\nmid\n```\nb\n```", &mut table);
        assert_eq!(text, "{{HTML-0}}\nmid\n{{HTML-1}}");
    }

    #[test]
    fn test_fence_keeps_inner_backticks() {
        assert_eq!(
            run(fenced, "```\nuse `x` here\n```"),
            "<pre><code>use `x` here</code></pre>"
        );
    }

    #[test]
    fn test_unterminated_fence_untouched() {
        let mut table = PlaceholderTable::new();
        assert_eq!(fenced("```\nopen", &mut table), "```\nopen");
        assert!(table.is_empty());
    }

    #[test]
    fn test_inline_code_escapes_body() {
        assert_eq!(
            run(inline, "`a<b>c`"),
            "<code class=\"inline-code\">a&lt;b&gt;c</code>"
        );
    }

    #[test]
    fn test_inline_code_does_not_cross_lines() {
        let mut table = PlaceholderTable::new();
        assert_eq!(inline("`a\nb`", &mut table), "`a\nb`");
    }

    #[test]
    fn test_inline_code_multiple_spans() {
        let mut table = PlaceholderTable::new();
        assert_eq!(inline("`a` and `b`", &mut table), "{{HTML-0}} and {{HTML-1}}");
    }
}
