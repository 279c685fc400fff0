//! Ordered and unordered lists.
//!
//! A list is a maximal run of consecutive lines carrying the same kind of
//! marker. Each line becomes one `<li>`; there is no nesting and no lazy
//! continuation.

use std::sync::LazyLock;

use regex::Regex;

use crate::placeholder::PlaceholderTable;

static ORDERED_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").unwrap());
static UNORDERED_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[*\-+]\s+").unwrap());

pub(crate) fn ordered(text: &str, table: &mut PlaceholderTable) -> String {
    collect_runs(&ORDERED_ITEM_RE, "ol", text, table)
}

pub(crate) fn unordered(text: &str, table: &mut PlaceholderTable) -> String {
    collect_runs(&UNORDERED_ITEM_RE, "ul", text, table)
}

/// Replace every run of lines matching `marker` with one list placeholder.
fn collect_runs(marker: &Regex, tag: &str, text: &str, table: &mut PlaceholderTable) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut items: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if let Some(prefix) = marker.find(line) {
            items.push(&line[prefix.end()..]);
            continue;
        }
        if !items.is_empty() {
            lines.push(flush(tag, &mut items, table));
        }
        lines.push(line.to_owned());
    }
    if !items.is_empty() {
        lines.push(flush(tag, &mut items, table));
    }

    lines.join("\n")
}

fn flush(tag: &str, items: &mut Vec<&str>, table: &mut PlaceholderTable) -> String {
    let body: String = items
        .drain(..)
        .map(|item| format!("<li>{item}</li>"))
        .collect();
    table.store(format!("<{tag}>{body}</{tag}>"))
}
