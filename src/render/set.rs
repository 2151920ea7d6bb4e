//! Ordered set of registered template renderers.

use std::sync::Arc;

use super::{HandlebarsRenderer, StaticRenderer, TemplateRenderer};

/// Renderers in registration order; extension lookup is first-match-wins.
#[derive(Clone, Default)]
pub struct RendererSet {
    renderers: Vec<Arc<dyn TemplateRenderer>>,
}

impl RendererSet {
    /// Create a new empty set.
    pub fn new() -> Self {
        Self {
            renderers: Vec::new(),
        }
    }

    /// Create a set with every built-in renderer.
    pub fn with_builtins() -> Self {
        let mut set = Self::new();
        set.register(Arc::new(StaticRenderer::new()));
        set.register(Arc::new(HandlebarsRenderer::new()));
        set
    }

    /// Look up a built-in renderer by its configuration name.
    pub fn builtin(name: &str) -> Option<Arc<dyn TemplateRenderer>> {
        match name {
            StaticRenderer::NAME => Some(Arc::new(StaticRenderer::new())),
            HandlebarsRenderer::NAME => Some(Arc::new(HandlebarsRenderer::new())),
            _ => None,
        }
    }

    /// Names of all built-in renderers.
    pub fn builtin_names() -> &'static [&'static str] {
        &[StaticRenderer::NAME, HandlebarsRenderer::NAME]
    }

    /// Register a renderer at the end of the set.
    pub fn register(&mut self, renderer: Arc<dyn TemplateRenderer>) {
        self.renderers.push(renderer);
    }

    /// Every extension advertised by any renderer, in registration order.
    ///
    /// May contain duplicates when renderers overlap.
    pub fn all_extensions(&self) -> Vec<String> {
        self.renderers
            .iter()
            .flat_map(|r| r.template_file_extensions())
            .collect()
    }

    /// First renderer advertising `extension` (case-insensitive).
    pub fn resolve(&self, extension: &str) -> Option<Arc<dyn TemplateRenderer>> {
        self.renderers
            .iter()
            .find(|r| {
                r.template_file_extensions()
                    .iter()
                    .any(|e| e.eq_ignore_ascii_case(extension))
            })
            .cloned()
    }

    /// Invalidate every renderer's caches.
    pub fn invalidate_all(&self) {
        for renderer in &self.renderers {
            renderer.invalidate();
        }
    }

    /// Iterate over renderers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn TemplateRenderer>> {
        self.renderers.iter()
    }

    /// Get the number of registered renderers.
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl std::fmt::Debug for RendererSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.renderers.iter().map(|r| r.name()))
            .finish()
    }
}
