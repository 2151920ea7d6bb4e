//! Shape tables: the output of discovery.
//!
//! Discovery writes bindings into a [`ShapeTableBuilder`] through
//! `describe(shape).from(feature).bound_as(template, factory)`. A finished
//! builder becomes an immutable [`ShapeTable`], which the
//! [`ShapeTableManager`] publishes atomically, one generation at a time.
//!
//! # Example
//!
//! ```
//! use shapebind::extension::Feature;
//! use shapebind::render::DisplayContext;
//! use shapebind::table::ShapeTableBuilder;
//!
//! let feature = Feature::new("Blog", "Blog");
//! let mut builder = ShapeTableBuilder::new();
//! builder
//!     .describe("Post")
//!     .from(&feature)
//!     .bound_as("~/Blog/Views/Post.html", |_, _| Ok("<p>post</p>".to_string()));
//!
//! let table = builder.build();
//! let html = table.render("post", &DisplayContext::default()).unwrap();
//! assert_eq!(html, "<p>post</p>");
//! ```

pub mod builder;
pub mod fingerprint;
pub mod manager;
pub mod shape_table;

pub use builder::{ShapeAlterationBuilder, ShapeTableBuilder};
pub use fingerprint::ContentFingerprint;
pub use manager::ShapeTableManager;
pub use shape_table::{BindingRecord, ShapeTable};

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::extension::Feature;
use crate::render::DisplayContext;

/// Render-time closure stored in a binding.
pub type RenderFactory =
    Arc<dyn Fn(&ShapeDescriptor, &DisplayContext) -> Result<String> + Send + Sync>;

/// One (shape type, feature) to template association.
#[derive(Clone)]
pub struct ShapeBinding {
    /// Shape type this binding renders.
    pub shape_type: String,
    /// Feature the binding belongs to.
    pub feature: Option<Feature>,
    /// Template virtual path the binding was created from.
    pub binding_source: String,
    factory: RenderFactory,
}

impl ShapeBinding {
    /// Create a binding.
    pub fn new(
        shape_type: impl Into<String>,
        feature: Option<Feature>,
        binding_source: impl Into<String>,
        factory: RenderFactory,
    ) -> Self {
        Self {
            shape_type: shape_type.into(),
            feature,
            binding_source: binding_source.into(),
            factory,
        }
    }

    /// Id of the owning feature, or an empty string.
    pub fn feature_id(&self) -> &str {
        self.feature.as_ref().map(|f| f.id.as_str()).unwrap_or("")
    }

    /// Invoke the render factory.
    pub fn render(&self, descriptor: &ShapeDescriptor, ctx: &DisplayContext) -> Result<String> {
        (self.factory)(descriptor, ctx)
    }
}

impl fmt::Debug for ShapeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeBinding")
            .field("shape_type", &self.shape_type)
            .field("feature", &self.feature_id())
            .field("binding_source", &self.binding_source)
            .finish_non_exhaustive()
    }
}

/// All bindings registered for one shape type.
#[derive(Debug, Clone)]
pub struct ShapeDescriptor {
    /// Shape type as first registered.
    pub shape_type: String,
    /// Bindings in registration order.
    pub bindings: Vec<ShapeBinding>,
}

impl ShapeDescriptor {
    /// Create a descriptor without bindings.
    pub fn new(shape_type: impl Into<String>) -> Self {
        Self {
            shape_type: shape_type.into(),
            bindings: Vec::new(),
        }
    }

    /// The effective binding: the last one registered.
    pub fn binding(&self) -> Option<&ShapeBinding> {
        self.bindings.last()
    }
}
