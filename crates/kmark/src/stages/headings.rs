//! ATX headings, one stage per level.
//!
//! Levels run from 6 down to 1. A line starting with seven or more `#` matches
//! no level and stays paragraph text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_html;
use crate::placeholder::PlaceholderTable;

/// Heading patterns indexed by `level - 1`.
static HEADING_RES: LazyLock<[Regex; 6]> = LazyLock::new(|| {
    std::array::from_fn(|i| {
        let level = i + 1;
        Regex::new(&format!(r"(?m)^#{{{level}}}[ \t]+(\S.*?)[ \t]*$")).unwrap()
    })
});

fn heading(level: usize, text: &str, table: &mut PlaceholderTable) -> String {
    HEADING_RES[level - 1]
        .replace_all(text, |caps: &Captures<'_>| {
            table.store(format!("<h{level}>{}</h{level}>", escape_html(&caps[1])))
        })
        .into_owned()
}

pub(crate) fn h6(text: &str, table: &mut PlaceholderTable) -> String {
    heading(6, text, table)
}

pub(crate) fn h5(text: &str, table: &mut PlaceholderTable) -> String {
    heading(5, text, table)
}

pub(crate) fn h4(text: &str, table: &mut PlaceholderTable) -> String {
    heading(4, text, table)
}

pub(crate) fn h3(text: &str, table: &mut PlaceholderTable) -> String {
    heading(3, text, table)
}

pub(crate) fn h2(text: &str, table: &mut PlaceholderTable) -> String {
    heading(2, text, table)
}

pub(crate) fn h1(text: &str, table: &mut PlaceholderTable) -> String {
    heading(1, text, table)
}
