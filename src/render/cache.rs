//! Compiled template cache.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use handlebars::Handlebars;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{Result, ShapeError};

/// Compiled Handlebars templates keyed by physical path.
///
/// Owned by a renderer; entries live until [`TemplateCache::invalidate`],
/// which the shape table manager triggers for every new table generation.
pub struct TemplateCache {
    registry: RwLock<Handlebars<'static>>,
    generation: AtomicU64,
}

impl TemplateCache {
    /// Create an empty cache with strict rendering.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        Self {
            registry: RwLock::new(registry),
            generation: AtomicU64::new(0),
        }
    }

    /// Render the template at `path`, compiling it on first use.
    ///
    /// `template` names the template in error messages.
    pub fn render(
        &self,
        template: &str,
        path: &Path,
        data: &serde_json::Value,
    ) -> Result<String> {
        let key = path.to_string_lossy().to_string();

        {
            let registry = self.registry.read();
            if registry.has_template(&key) {
                return registry
                    .render(&key, data)
                    .map_err(|e| render_error(template, e));
            }
        }

        let mut registry = self.registry.write();
        if !registry.has_template(&key) {
            debug!(template, "Compiling template");
            registry
                .register_template_file(&key, path)
                .map_err(|e| render_error(template, e))?;
        }
        registry
            .render(&key, data)
            .map_err(|e| render_error(template, e))
    }

    /// Drop every compiled template.
    pub fn invalidate(&self) {
        self.registry.write().clear_templates();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of invalidations so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Number of compiled templates held.
    pub fn len(&self) -> usize {
        self.registry.read().get_templates().len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new()
    }
}

fn render_error(template: &str, error: impl std::fmt::Display) -> ShapeError {
    ShapeError::Render {
        template: template.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn compiles_once_and_reuses() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Post.hbs");
        fs::write(&path, "<h1>{{title}}</h1>").unwrap();

        let cache = TemplateCache::new();
        let first = cache.render("Post", &path, &json!({"title": "One"})).unwrap();
        assert_eq!(first, "<h1>One</h1>");
        assert_eq!(cache.len(), 1);

        // Changes on disk are not seen until invalidation.
        fs::write(&path, "<h2>{{title}}</h2>").unwrap();
        let second = cache.render("Post", &path, &json!({"title": "Two"})).unwrap();
        assert_eq!(second, "<h1>Two</h1>");
    }

    #[test]
    fn invalidate_drops_compiled_templates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Post.hbs");
        fs::write(&path, "<h1>{{title}}</h1>").unwrap();

        let cache = TemplateCache::new();
        cache.render("Post", &path, &json!({"title": "One"})).unwrap();

        fs::write(&path, "<h2>{{title}}</h2>").unwrap();
        cache.invalidate();
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), 1);

        let output = cache.render("Post", &path, &json!({"title": "Two"})).unwrap();
        assert_eq!(output, "<h2>Two</h2>");
    }

    #[test]
    fn strict_mode_rejects_missing_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Post.hbs");
        fs::write(&path, "{{missing}}").unwrap();

        let cache = TemplateCache::new();
        let err = cache.render("Post", &path, &json!({})).unwrap_err();
        assert!(matches!(err, ShapeError::Render { .. }));
    }

    #[test]
    fn compile_error_is_render_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Broken.hbs");
        fs::write(&path, "{{#if}}").unwrap();

        let cache = TemplateCache::new();
        let err = cache.render("Broken", &path, &json!({})).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }
}
