//! Renderer for Handlebars shape templates.

use crate::error::Result;
use crate::harvest::HarvestInfo;
use crate::table::ShapeDescriptor;

use super::{DisplayContext, TemplateCache, TemplateRenderer};

/// Renders `hbs`/`handlebars` templates against the display context model.
///
/// When the model is a JSON object, `shape_type` and `display_type` are
/// added to it unless the model already defines them.
#[derive(Default)]
pub struct HandlebarsRenderer {
    cache: TemplateCache,
}

impl HandlebarsRenderer {
    /// Configuration name.
    pub const NAME: &'static str = "handlebars";

    /// Create a renderer with an empty template cache.
    pub fn new() -> Self {
        Self {
            cache: TemplateCache::new(),
        }
    }

    /// The renderer's compiled template cache.
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn template_file_extensions(&self) -> Vec<String> {
        vec!["hbs".to_string(), "handlebars".to_string()]
    }

    fn render(
        &self,
        descriptor: &ShapeDescriptor,
        ctx: &DisplayContext,
        info: &HarvestInfo,
    ) -> Result<String> {
        let mut data = ctx.model.clone();
        if let serde_json::Value::Object(map) = &mut data {
            map.entry("shape_type")
                .or_insert_with(|| descriptor.shape_type.clone().into());
            if let Some(display_type) = &ctx.display_type {
                map.entry("display_type")
                    .or_insert_with(|| display_type.clone().into());
            }
        }

        self.cache
            .render(&info.template_virtual_path, &info.physical_path, &data)
    }

    fn invalidate(&self) {
        self.cache.invalidate();
    }
}
