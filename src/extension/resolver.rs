//! Feature activation resolution.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;

use super::provider::FeatureStateProvider;
use super::types::Extension;

/// Computes the set of extensions whose templates discovery should visit.
pub struct FeatureActivationResolver<'a> {
    provider: &'a dyn FeatureStateProvider,
}

impl<'a> FeatureActivationResolver<'a> {
    /// Create a resolver over a feature-state provider.
    pub fn new(provider: &'a dyn FeatureStateProvider) -> Self {
        Self { provider }
    }

    /// Resolve the distinct extensions referenced by the enabled features,
    /// skipping features whose id is in `excluded`.
    ///
    /// Extensions are returned once each, in the order their first enabled
    /// feature was reported. Provider failures propagate unchanged.
    pub fn active_extensions(&self, excluded: &HashSet<String>) -> Result<Vec<Arc<Extension>>> {
        let enabled = self.provider.enabled_features()?;

        let mut seen = HashSet::new();
        let mut extensions = Vec::new();

        for entry in enabled {
            if excluded.contains(&entry.feature.id) {
                debug!(feature = %entry.feature.id, "Skipping excluded feature");
                continue;
            }
            if seen.insert(entry.extension.id.clone()) {
                extensions.push(entry.extension);
            }
        }

        Ok(extensions)
    }
}
