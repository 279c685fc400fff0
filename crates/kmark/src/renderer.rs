//! Renderer with memoization and the view container.
//!
//! Provides [`Renderer`] for rendering content to HTML through the standard
//! [`Pipeline`], consulting a [`RenderCache`] first.

use crate::cache::{MemoryRenderCache, NullRenderCache, RenderCache};
use crate::escape::escape_html;
use crate::pipeline::Pipeline;

/// Base class of the view container.
pub const CONTAINER_CLASS: &str = "kmark-content";

/// Result of [`Renderer::render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOutput {
    /// Rendered HTML.
    pub html: String,
    /// Whether the result was served from cache.
    pub from_cache: bool,
}

/// Configuration for [`Renderer`].
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Maximum number of memoized renders. `None` disables caching.
    pub cache_capacity: Option<usize>,
    /// Wrap [`Renderer::render_view`] output in the container `<div>`.
    pub container: bool,
    /// Default styling class(es) for the container.
    pub class: Option<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            cache_capacity: Some(256),
            container: true,
            class: None,
        }
    }
}

/// Renderer with optional memoization.
///
/// Safe to share between threads; each render uses its own placeholder table.
///
/// # Example
///
/// ```
/// use kmark::{Renderer, RendererConfig};
///
/// let renderer = Renderer::new(RendererConfig::default());
/// let first = renderer.render(Some("# Hi"));
/// let second = renderer.render(Some("# Hi"));
///
/// assert_eq!(first.html, "<h1>Hi</h1>");
/// assert!(!first.from_cache);
/// assert!(second.from_cache);
/// ```
pub struct Renderer {
    pipeline: Pipeline,
    cache: Box<dyn RenderCache>,
    container: bool,
    class: Option<String>,
}

impl Renderer {
    /// Create a renderer from configuration.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        let cache: Box<dyn RenderCache> = match config.cache_capacity {
            Some(capacity) => Box::new(MemoryRenderCache::new(capacity)),
            None => Box::new(NullRenderCache),
        };
        Self::with_cache(config, cache)
    }

    /// Create a renderer with a caller-supplied cache.
    ///
    /// `config.cache_capacity` is ignored.
    #[must_use]
    pub fn with_cache(config: RendererConfig, cache: Box<dyn RenderCache>) -> Self {
        Self {
            pipeline: Pipeline::standard(),
            cache,
            container: config.container,
            class: config.class,
        }
    }

    /// Render `content` to HTML. Absent content renders to the empty string.
    #[must_use]
    pub fn render(&self, content: Option<&str>) -> RenderOutput {
        let key = content.unwrap_or_default();
        if let Some(html) = self.cache.get(key) {
            return RenderOutput {
                html,
                from_cache: true,
            };
        }

        let html = self.pipeline.run(content).html;
        self.cache.set(key, &html);
        RenderOutput {
            html,
            from_cache: false,
        }
    }

    /// Render `content` for display.
    ///
    /// When the container is enabled the HTML is wrapped in
    /// `<div class="kmark-content {class}">`. `class` overrides the configured
    /// default class.
    #[must_use]
    pub fn render_view(&self, content: Option<&str>, class: Option<&str>) -> RenderOutput {
        let output = self.render(content);
        if !self.container {
            return output;
        }
        let class = class.or(self.class.as_deref());
        RenderOutput {
            html: wrap_container(&output.html, class),
            from_cache: output.from_cache,
        }
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("pipeline", &self.pipeline)
            .field("container", &self.container)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

/// Wrap rendered HTML in the view container.
#[must_use]
pub fn wrap_container(html: &str, class: Option<&str>) -> String {
    let class = class.map(str::trim).filter(|c| !c.is_empty());
    match class {
        Some(extra) => format!(
            "<div class=\"{CONTAINER_CLASS} {}\">{html}</div>",
            escape_html(extra)
        ),
        None => format!("<div class=\"{CONTAINER_CLASS}\">{html}</div>"),
    }
}
