//! Paragraph assembly.

use std::sync::LazyLock;

use regex::Regex;

use crate::placeholder::has_token;

static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Wrap text runs separated by blank lines in `<p>`.
///
/// Runs that contain a placeholder token are emitted unwrapped so that lists,
/// headings and code blocks never end up inside a paragraph. Single newlines
/// inside a wrapped run become `<br/>`. Empty runs are dropped and the rest
/// are joined with `\n`.
#[must_use]
pub fn assemble(text: &str) -> String {
    BLANK_LINES_RE
        .split(text)
        .map(str::trim)
        .filter(|run| !run.is_empty())
        .map(|run| {
            if has_token(run) {
                run.to_owned()
            } else {
                format!("<p>{}</p>", run.replace('\n', "<br/>"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
