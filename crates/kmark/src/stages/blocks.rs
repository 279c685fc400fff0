//! Single-line block constructs: blockquotes and horizontal rules.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::placeholder::PlaceholderTable;

/// Quote marker as it appears after the global escape turned `>` into `&gt;`.
static QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^&gt;[ \t]+(.*?)[ \t]*$").unwrap());

static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:-{3,}|\*{3,}|_{3,})[ \t]*$").unwrap());

/// One `<blockquote>` per quoted line; consecutive lines are not merged.
pub(crate) fn blockquote(text: &str, table: &mut PlaceholderTable) -> String {
    QUOTE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            table.store(format!("<blockquote>{}</blockquote>", &caps[1]))
        })
        .into_owned()
}

pub(crate) fn horizontal_rule(text: &str, table: &mut PlaceholderTable) -> String {
    RULE_RE
        .replace_all(text, |_: &Captures<'_>| table.store("<hr/>"))
        .into_owned()
}
