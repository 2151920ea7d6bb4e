//! Immutable, queryable shape table.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{Result, ShapeError};
use crate::render::DisplayContext;

use super::{ShapeBinding, ShapeDescriptor};

/// Serializable view of one binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingRecord {
    pub shape_type: String,
    pub feature: String,
    pub template: String,
}

/// The bindings of one discovery pass.
///
/// Shape type lookups are case-insensitive. When several bindings exist
/// for a shape type, the last registered one is effective.
#[derive(Debug, Clone, Default)]
pub struct ShapeTable {
    bindings: Vec<ShapeBinding>,
    descriptors: Vec<ShapeDescriptor>,
    index: HashMap<String, usize>,
}

impl ShapeTable {
    /// Build a table from bindings in registration order.
    pub fn from_bindings(bindings: Vec<ShapeBinding>) -> Self {
        let mut descriptors: Vec<ShapeDescriptor> = Vec::new();
        let mut index = HashMap::new();

        for binding in &bindings {
            let key = binding.shape_type.to_lowercase();
            let slot = *index.entry(key).or_insert_with(|| {
                descriptors.push(ShapeDescriptor::new(binding.shape_type.clone()));
                descriptors.len() - 1
            });
            descriptors[slot].bindings.push(binding.clone());
        }

        Self {
            bindings,
            descriptors,
            index,
        }
    }

    /// Every binding, in registration order.
    pub fn bindings(&self) -> &[ShapeBinding] {
        &self.bindings
    }

    /// Descriptors in order of first registration.
    pub fn descriptors(&self) -> &[ShapeDescriptor] {
        &self.descriptors
    }

    /// Descriptor for a shape type.
    pub fn descriptor(&self, shape_type: &str) -> Option<&ShapeDescriptor> {
        self.index
            .get(&shape_type.to_lowercase())
            .map(|&i| &self.descriptors[i])
    }

    /// Effective binding for a shape type.
    pub fn binding(&self, shape_type: &str) -> Option<&ShapeBinding> {
        self.descriptor(shape_type).and_then(|d| d.binding())
    }

    /// Bindings attributed to one feature, in registration order.
    pub fn for_feature<'a>(
        &'a self,
        feature_id: &'a str,
    ) -> impl Iterator<Item = &'a ShapeBinding> {
        self.bindings
            .iter()
            .filter(move |b| b.feature_id() == feature_id)
    }

    /// Shape types in order of first registration.
    pub fn shape_types(&self) -> Vec<&str> {
        self.descriptors
            .iter()
            .map(|d| d.shape_type.as_str())
            .collect()
    }

    /// Render a shape through its effective binding.
    ///
    /// # Errors
    ///
    /// Returns `UnknownShape` when no binding exists; renderer errors
    /// propagate unchanged.
    pub fn render(&self, shape_type: &str, ctx: &DisplayContext) -> Result<String> {
        let unknown = || ShapeError::UnknownShape {
            shape_type: shape_type.to_string(),
        };
        let descriptor = self.descriptor(shape_type).ok_or_else(unknown)?;
        let binding = descriptor.binding().ok_or_else(unknown)?;
        binding.render(descriptor, ctx)
    }

    /// Serializable records for every binding, in registration order.
    pub fn records(&self) -> Vec<BindingRecord> {
        self.bindings
            .iter()
            .map(|b| BindingRecord {
                shape_type: b.shape_type.clone(),
                feature: b.feature_id().to_string(),
                template: b.binding_source.clone(),
            })
            .collect()
    }

    /// Get the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the table has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
