//! Links and images.
//!
//! The link stage runs first and does not look behind for `!`, so
//! `![alt](url)` with a non-empty alt renders as `!` followed by a link.
//! Only images with an empty alt text reach the image stage intact.
//!
//! Text and URLs were escaped by the global escape stage and are inserted
//! verbatim; `&amp;` inside an attribute value is what a browser expects.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::placeholder::PlaceholderTable;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\n]+)\)").unwrap());
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]\n]*)\]\(([^)\n]+)\)").unwrap());

/// Schemes that can execute script when followed from a link or image.
const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Whether `url` may be used as-is in `href` or `src`.
///
/// Browsers drop ASCII whitespace inside a scheme, so it is ignored here too.
fn is_safe_url(url: &str) -> bool {
    let url: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    !BLOCKED_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

pub(crate) fn links(text: &str, table: &mut PlaceholderTable) -> String {
    LINK_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let href = if is_safe_url(&caps[2]) { &caps[2] } else { "#" };
            table.store(format!(
                "<a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                &caps[1]
            ))
        })
        .into_owned()
}

pub(crate) fn images(text: &str, table: &mut PlaceholderTable) -> String {
    IMAGE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let src = if is_safe_url(&caps[2]) { &caps[2] } else { "" };
            table.store(format!(
                "<img src=\"{src}\" alt=\"{}\" loading=\"lazy\"/>",
                &caps[1]
            ))
        })
        .into_owned()
}
