//! KMark: a small markdown subset rendered to safe HTML.
//!
//! Rendering is a linear pipeline over one working string:
//!
//! 1. **Normalize** line endings, drop `kmark` sentinel lines, trim.
//! 2. **Extract** constructs in a fixed order ([`STANDARD_STAGES`]). Each
//!    finished fragment is stored in a [`PlaceholderTable`] and replaced by an
//!    opaque `{{HTML-<n>}}` token. The literal text is HTML-escaped exactly
//!    once, midway through the sequence.
//! 3. **Assemble paragraphs** from blank-line separated runs.
//! 4. **Resolve** tokens back into their fragments, bounded to
//!    [`MAX_RESOLVE_PASSES`] passes.
//!
//! Supported syntax: fenced and inline code, `#` headings (levels 1-6),
//! bold, italic, strikethrough, flat ordered and unordered lists, single-line
//! blockquotes, links, images, horizontal rules and ` -- ` em dashes.
//!
//! # Example
//!
//! ```
//! let html = kmark::render(Some("# Notes\n\n- **one**\n- `two`"));
//! assert_eq!(
//!     html,
//!     "<h1>Notes</h1>\n<ul><li><strong>one</strong></li><li><code class=\"inline-code\">two</code></li></ul>"
//! );
//! ```

mod cache;
mod escape;
mod normalize;
mod paragraph;
mod pipeline;
mod placeholder;
mod renderer;
mod stages;

pub use cache::{MemoryRenderCache, NullRenderCache, RenderCache};
pub use escape::escape_html;
pub use normalize::normalize;
pub use paragraph::assemble;
pub use pipeline::{Pipeline, Rendered, render};
pub use placeholder::{MAX_RESOLVE_PASSES, PlaceholderTable, Resolution, has_token, token};
pub use renderer::{CONTAINER_CLASS, RenderOutput, Renderer, RendererConfig, wrap_container};
pub use stages::{STANDARD_STAGES, Stage, StageFn};
