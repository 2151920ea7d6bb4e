//! Binding registration: `describe(shape).from(feature).bound_as(...)`.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;
use crate::extension::Feature;
use crate::render::DisplayContext;

use super::{ShapeBinding, ShapeDescriptor, ShapeTable};

/// Collects bindings for one discovery pass.
#[derive(Debug, Default)]
pub struct ShapeTableBuilder {
    excluded_feature_ids: HashSet<String>,
    bindings: Vec<ShapeBinding>,
}

impl ShapeTableBuilder {
    /// Create a builder with no excluded features.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder whose pass ignores the given feature ids.
    pub fn with_excluded_features<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_feature_ids: ids.into_iter().map(Into::into).collect(),
            bindings: Vec::new(),
        }
    }

    /// Feature ids discovery must not activate extensions for.
    pub fn excluded_feature_ids(&self) -> &HashSet<String> {
        &self.excluded_feature_ids
    }

    /// Start describing a shape type.
    pub fn describe(&mut self, shape_type: &str) -> ShapeAlterationBuilder<'_> {
        ShapeAlterationBuilder {
            builder: self,
            shape_type: shape_type.to_string(),
            feature: None,
        }
    }

    /// Bindings registered so far, in order.
    pub fn bindings(&self) -> &[ShapeBinding] {
        &self.bindings
    }

    /// Get the number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Freeze the registered bindings into a table.
    pub fn build(self) -> ShapeTable {
        ShapeTable::from_bindings(self.bindings)
    }
}

/// In-progress description of one shape binding.
pub struct ShapeAlterationBuilder<'a> {
    builder: &'a mut ShapeTableBuilder,
    shape_type: String,
    feature: Option<Feature>,
}

impl ShapeAlterationBuilder<'_> {
    /// Attribute the binding to a feature.
    pub fn from(mut self, feature: &Feature) -> Self {
        self.feature = Some(feature.clone());
        self
    }

    /// Register the binding with its template path and render factory.
    pub fn bound_as<F>(self, binding_source: impl Into<String>, factory: F)
    where
        F: Fn(&ShapeDescriptor, &DisplayContext) -> Result<String> + Send + Sync + 'static,
    {
        self.builder.bindings.push(ShapeBinding::new(
            self.shape_type,
            self.feature,
            binding_source,
            Arc::new(factory),
        ));
    }
}
