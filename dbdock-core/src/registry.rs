//! Content registry
//!
//! Maps a tab kind to the renderer that draws it and the title new tabs of
//! that kind get. The layout engine never renders anything itself; it only
//! needs the lookup, and unknown kinds resolve to a fallback descriptor
//! instead of failing.

use std::collections::HashMap;

use crate::layout::TabKind;

/// Renderer name used for kinds nobody registered.
pub const FALLBACK_RENDERER: &str = "unsupported";

/// How a kind of tab is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    /// Renderer identifier the UI resolves to a component.
    pub renderer: String,
    /// Title given to new tabs of this kind.
    pub default_title: String,
}

impl ContentDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(renderer: impl Into<String>, default_title: impl Into<String>) -> Self {
        Self {
            renderer: renderer.into(),
            default_title: default_title.into(),
        }
    }
}

/// Lookup from tab kind to content descriptor.
#[derive(Debug, Clone)]
pub struct ContentRegistry {
    descriptors: HashMap<TabKind, ContentDescriptor>,
    fallback: ContentDescriptor,
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::with_builtin_kinds()
    }
}

impl ContentRegistry {
    /// Creates an empty registry; every kind resolves to the fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
            fallback: ContentDescriptor::new(FALLBACK_RENDERER, "Untitled"),
        }
    }

    /// Creates a registry with the built-in views registered.
    #[must_use]
    pub fn with_builtin_kinds() -> Self {
        let mut registry = Self::new();
        registry.register(TabKind::Data, ContentDescriptor::new("table-viewer", "Data"));
        registry.register(TabKind::Query, ContentDescriptor::new("query-editor", "Query"));
        registry.register(TabKind::Ai, ContentDescriptor::new("ai-chat", "AI Chat"));
        registry.register(TabKind::Terminal, ContentDescriptor::new("terminal", "Terminal"));
        registry.register(TabKind::Console, ContentDescriptor::new("console", "Console"));
        registry
    }

    /// Registers (or replaces) the descriptor of a kind.
    pub fn register(&mut self, kind: TabKind, descriptor: ContentDescriptor) {
        self.descriptors.insert(kind, descriptor);
    }

    /// Returns true if the kind has a descriptor.
    #[must_use]
    pub fn is_registered(&self, kind: &TabKind) -> bool {
        self.descriptors.contains_key(kind)
    }

    /// Returns the renderer of a registered kind.
    #[must_use]
    pub fn resolve_renderer(&self, kind: &TabKind) -> Option<&str> {
        self.descriptors.get(kind).map(|d| d.renderer.as_str())
    }

    /// Returns the descriptor of a kind, or the fallback for unknown kinds.
    #[must_use]
    pub fn resolve_or_fallback(&self, kind: &TabKind) -> &ContentDescriptor {
        self.descriptors.get(kind).unwrap_or(&self.fallback)
    }

    /// Returns the title a new tab of this kind should get.
    ///
    /// Unknown kinds are titled after their tag.
    #[must_use]
    pub fn default_title(&self, kind: &TabKind) -> String {
        self.descriptors
            .get(kind)
            .map_or_else(|| kind.as_str().to_owned(), |d| d.default_title.clone())
    }
}
