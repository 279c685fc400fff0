//! The render pipeline.
//!
//! Normalizer → extraction stages → paragraph assembler → placeholder
//! resolver. Every step is a pure function of its input; the only state is
//! the working text and the placeholder table owned by one [`Pipeline::run`].

use crate::normalize::normalize;
use crate::paragraph::assemble;
use crate::placeholder::{PlaceholderTable, protect_literal_tokens, restore_literal_tokens};
use crate::stages::{STANDARD_STAGES, Stage};

/// Result of one pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    /// Final HTML.
    pub html: String,
    /// Number of fragments produced by the stages.
    pub fragments: usize,
    /// Resolver passes needed to splice fragments back in.
    pub passes: usize,
    /// Whether placeholder tokens were left in `html`.
    pub unresolved: bool,
}

/// Ordered sequence of extraction stages.
#[derive(Clone, Copy, Debug)]
pub struct Pipeline {
    stages: &'static [Stage],
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl Pipeline {
    /// The standard KMark pipeline.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            stages: &STANDARD_STAGES,
        }
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> {
        self.stages.iter().map(Stage::name)
    }

    /// Render `input` to HTML. Absent input renders to the empty string.
    ///
    /// Token-like text typed by the user (`{{HTML-0}}`) is carried through as
    /// literal text and never resolved.
    #[must_use]
    pub fn run(&self, input: Option<&str>) -> Rendered {
        let normalized = normalize(input);
        if normalized.is_empty() {
            return Rendered {
                html: String::new(),
                fragments: 0,
                passes: 0,
                unresolved: false,
            };
        }

        let input_len = normalized.len();
        let mut text = protect_literal_tokens(&normalized);
        let mut table = PlaceholderTable::new();
        for stage in self.stages {
            text = stage.apply(&text, &mut table);
            tracing::trace!(stage = stage.name(), fragments = table.len(), "Stage applied");
        }

        let resolution = table.resolve(&assemble(&text));
        if resolution.unresolved {
            tracing::warn!(
                passes = resolution.passes,
                "Placeholder tokens left unresolved after pass limit"
            );
        }

        let html = restore_literal_tokens(&resolution.html);
        tracing::debug!(
            input_len,
            output_len = html.len(),
            fragments = table.len(),
            passes = resolution.passes,
            "Rendered kmark"
        );

        Rendered {
            html,
            fragments: table.len(),
            passes: resolution.passes,
            unresolved: resolution.unresolved,
        }
    }
}

/// Render `input` with the standard pipeline.
///
/// Total over all inputs: never panics, never fails. Malformed syntax is
/// rendered as escaped literal text.
///
/// # Examples
///
/// ```
/// assert_eq!(kmark::render(Some("**hi** <there>")), "<strong>hi</strong> &lt;there&gt;");
/// assert_eq!(kmark::render(None), "");
/// ```
#[must_use]
pub fn render(input: Option<&str>) -> String {
    Pipeline::standard().run(input).html
}
