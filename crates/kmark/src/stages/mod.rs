//! Extraction stages.
//!
//! Each stage takes the whole working text, may store fragments in the
//! [`PlaceholderTable`] and returns the rewritten text. [`STANDARD_STAGES`]
//! fixes their order; moving a stage changes what the others see.

mod blocks;
mod code;
mod emphasis;
mod headings;
mod links;
mod lists;
mod text;

use crate::placeholder::PlaceholderTable;

/// Signature shared by all stages.
pub type StageFn = fn(&str, &mut PlaceholderTable) -> String;

/// A named pipeline stage.
#[derive(Clone, Copy)]
pub struct Stage {
    name: &'static str,
    run: StageFn,
}

impl Stage {
    /// Create a stage from a name and a function.
    #[must_use]
    pub const fn new(name: &'static str, run: StageFn) -> Self {
        Self { name, run }
    }

    /// Stage name, used in logs and `kmark stages`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the stage on `text`.
    #[must_use]
    pub fn apply(&self, text: &str, table: &mut PlaceholderTable) -> String {
        (self.run)(text, table)
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Stage").field(&self.name).finish()
    }
}

/// Stages in execution order.
///
/// Code runs before headings and escaping so its body is escaped once and
/// never re-read as markdown. Headings run before the escape for the same
/// reason. Everything after `escape` sees escaped text, which is why the
/// blockquote stage looks for `&gt;`.
pub static STANDARD_STAGES: [Stage; 21] = [
    Stage::new("fenced-code", code::fenced),
    Stage::new("inline-code", code::inline),
    Stage::new("heading-6", headings::h6),
    Stage::new("heading-5", headings::h5),
    Stage::new("heading-4", headings::h4),
    Stage::new("heading-3", headings::h3),
    Stage::new("heading-2", headings::h2),
    Stage::new("heading-1", headings::h1),
    Stage::new("escape", text::escape),
    Stage::new("bold-star", emphasis::bold_star),
    Stage::new("bold-underscore", emphasis::bold_underscore),
    Stage::new("italic-star", emphasis::italic_star),
    Stage::new("italic-underscore", emphasis::italic_underscore),
    Stage::new("strikethrough", emphasis::strikethrough),
    Stage::new("ordered-list", lists::ordered),
    Stage::new("unordered-list", lists::unordered),
    Stage::new("blockquote", blocks::blockquote),
    Stage::new("link", links::links),
    Stage::new("image", links::images),
    Stage::new("horizontal-rule", blocks::horizontal_rule),
    Stage::new("em-dash", text::em_dash),
];
