//! Stages that rewrite literal text without producing markup.

use crate::escape::escape_html;
use crate::placeholder::PlaceholderTable;

/// Escape everything that is not yet hidden behind a placeholder.
///
/// This is the only place literal text is escaped. Tokens contain no
/// HTML-significant characters and pass through unchanged.
pub(crate) fn escape(text: &str, _table: &mut PlaceholderTable) -> String {
    escape_html(text)
}

/// ` -- ` becomes ` — `.
pub(crate) fn em_dash(text: &str, _table: &mut PlaceholderTable) -> String {
    text.replace(" -- ", " \u{2014} ")
}
