//! Render memoization.
//!
//! Provides a trait for render caching and implementations:
//! - [`RenderCache`]: Trait for cache implementations
//! - [`NullRenderCache`]: No-op cache (disabled caching)
//! - [`MemoryRenderCache`]: In-memory cache keyed by raw input
//!
//! Rendering is a pure function of the input string, so the input itself is
//! the key and no other invalidation is needed.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Trait for render cache implementations.
pub trait RenderCache: Send + Sync {
    /// Cached HTML for `input`, if present.
    fn get(&self, input: &str) -> Option<String>;

    /// Store the HTML rendered from `input`.
    fn set(&self, input: &str, html: &str);
}

/// No-op cache implementation.
///
/// Always misses and discards stored content. Use when caching is disabled.
#[derive(Debug, Default)]
pub struct NullRenderCache;

impl RenderCache for NullRenderCache {
    fn get(&self, _input: &str) -> Option<String> {
        None
    }

    fn set(&self, _input: &str, _html: &str) {}
}

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, String>,
    order: VecDeque<String>,
}

/// Bounded in-memory cache with first-in-first-out eviction.
///
/// A poisoned lock is treated as a miss; storing into it is skipped.
#[derive(Debug)]
pub struct MemoryRenderCache {
    capacity: usize,
    entries: Mutex<Entries>,
}

impl MemoryRenderCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(Entries::default()),
        }
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.map.len())
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RenderCache for MemoryRenderCache {
    fn get(&self, input: &str) -> Option<String> {
        let entries = self.entries.lock().ok()?;
        let html = entries.map.get(input).cloned();
        if html.is_some() {
            tracing::debug!(input_len = input.len(), "Render cache hit");
        }
        html
    }

    fn set(&self, input: &str, html: &str) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };

        if let Some(existing) = entries.map.get_mut(input) {
            html.clone_into(existing);
            return;
        }

        while entries.map.len() >= self.capacity {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.map.remove(&oldest);
            tracing::debug!(capacity = self.capacity, "Render cache evicted oldest entry");
        }

        entries.order.push_back(input.to_owned());
        entries.map.insert(input.to_owned(), html.to_owned());
    }
}
