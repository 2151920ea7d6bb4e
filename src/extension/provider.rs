//! Feature-state providers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, ShapeError};

use super::types::{EnabledFeature, Extension};

/// Reports which features are currently enabled.
///
/// Implementations may block (for example on a database or remote call);
/// discovery calls this once per pass, before touching the file system.
pub trait FeatureStateProvider: Send + Sync {
    /// Return the enabled features in the provider's order.
    fn enabled_features(&self) -> Result<Vec<EnabledFeature>>;
}

/// Feature-state provider backed by a fixed extension catalog and a list
/// of enabled feature ids.
#[derive(Debug, Clone)]
pub struct StaticFeatureProvider {
    extensions: Vec<Arc<Extension>>,
    enabled: Vec<String>,
}

impl StaticFeatureProvider {
    /// Create a provider over `extensions` with the given features enabled.
    pub fn new(extensions: Vec<Extension>, enabled: &[&str]) -> Self {
        Self::with_enabled_ids(extensions, enabled.iter().map(|s| s.to_string()).collect())
    }

    /// Create a provider from owned feature ids.
    pub fn with_enabled_ids(extensions: Vec<Extension>, enabled: Vec<String>) -> Self {
        Self {
            extensions: extensions.into_iter().map(Arc::new).collect(),
            enabled,
        }
    }

    /// All known extensions, enabled or not.
    pub fn extensions(&self) -> &[Arc<Extension>] {
        &self.extensions
    }
}

impl FeatureStateProvider for StaticFeatureProvider {
    fn enabled_features(&self) -> Result<Vec<EnabledFeature>> {
        let mut by_feature = HashMap::new();
        for extension in &self.extensions {
            for feature in &extension.features {
                by_feature.insert(feature.id.as_str(), (feature, extension));
            }
        }

        self.enabled
            .iter()
            .map(|id| {
                let (feature, extension) =
                    by_feature
                        .get(id.as_str())
                        .ok_or_else(|| ShapeError::FeatureState {
                            message: format!(
                                "enabled feature '{}' is not declared by any extension",
                                id
                            ),
                        })?;
                Ok(EnabledFeature {
                    feature: (*feature).clone(),
                    extension: Arc::clone(extension),
                })
            })
            .collect()
    }
}
