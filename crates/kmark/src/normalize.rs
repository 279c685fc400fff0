//! Input normalization.

use std::sync::LazyLock;

use regex::Regex;

/// A line holding only the `kmark` format sentinel, with its line terminator.
static SENTINEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*kmark[ \t]*(?:\n|$)").unwrap());

/// Normalize raw input before the extraction stages run.
///
/// Converts `\r\n` and bare `\r` to `\n`, drops sentinel lines that contain
/// only the word `kmark` and trims surrounding whitespace. Absent input
/// normalizes to the empty string.
#[must_use]
pub fn normalize(input: Option<&str>) -> String {
    let Some(input) = input else {
        return String::new();
    };

    let unified = input.replace("\r\n", "\n").replace('\r', "\n");
    SENTINEL_RE.replace_all(&unified, "").trim().to_owned()
}
