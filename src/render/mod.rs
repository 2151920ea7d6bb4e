//! Template renderers.
//!
//! A [`TemplateRenderer`] advertises the template file extensions it
//! understands and turns a bound template into output at render time.
//! Renderers are looked up first-match-wins through a [`RendererSet`].
//!
//! - [`StaticRenderer`] - `html`/`htm` files, emitted verbatim
//! - [`HandlebarsRenderer`] - `hbs`/`handlebars` files, compiled and cached
//!
//! Rendering is synchronous; a renderer may block while it loads or
//! compiles a template on first use.

pub mod cache;
pub mod hbs;
pub mod set;
pub mod static_html;

pub use cache::TemplateCache;
pub use hbs::HandlebarsRenderer;
pub use set::RendererSet;
pub use static_html::StaticRenderer;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::harvest::HarvestInfo;
use crate::table::ShapeDescriptor;

/// Per-render input supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayContext {
    /// Data the template renders.
    #[serde(default)]
    pub model: serde_json::Value,
    /// Requested display type (e.g. `Summary`), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

impl DisplayContext {
    /// Create a context around a model.
    pub fn new(model: serde_json::Value) -> Self {
        Self {
            model,
            display_type: None,
        }
    }

    /// Set the requested display type.
    pub fn with_display_type(mut self, display_type: impl Into<String>) -> Self {
        self.display_type = Some(display_type.into());
        self
    }
}

/// Strategy that executes one template file format.
pub trait TemplateRenderer: Send + Sync {
    /// Name used in configuration and listings.
    fn name(&self) -> &str;

    /// Lower-case file extensions without a leading dot.
    ///
    /// Must be stable for the renderer's lifetime.
    fn template_file_extensions(&self) -> Vec<String>;

    /// Render the template described by `info`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::Render` when the template cannot be loaded,
    /// compiled, or rendered. Never returns empty output in place of an error.
    fn render(
        &self,
        descriptor: &ShapeDescriptor,
        ctx: &DisplayContext,
        info: &HarvestInfo,
    ) -> Result<String>;

    /// Drop anything cached from earlier discovery generations.
    fn invalidate(&self) {}
}
