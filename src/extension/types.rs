//! Extension and feature value types.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// The smallest independently enable/disable-able unit within an extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Feature {
    /// Feature identity.
    pub id: String,
    /// Identity of the extension that owns this feature.
    pub extension_id: String,
}

impl Feature {
    /// Create a feature belonging to the given extension.
    pub fn new(id: impl Into<String>, extension_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extension_id: extension_id.into(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A module or theme owning a sub-path of templates.
///
/// Immutable for the duration of a discovery pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extension {
    /// Extension identity.
    pub id: String,
    /// Path of the extension relative to the content root, `/`-separated.
    pub sub_path: String,
    /// Features contained in this extension, in declaration order.
    pub features: Vec<Feature>,
}

impl Extension {
    /// Create an extension whose features all belong to it.
    pub fn new(id: &str, sub_path: &str, feature_ids: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            sub_path: sub_path.trim_matches('/').to_string(),
            features: feature_ids.iter().map(|f| Feature::new(*f, id)).collect(),
        }
    }

    /// Look up one of this extension's features by id.
    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }
}

/// A feature reported as enabled, together with the extension that owns it.
#[derive(Debug, Clone)]
pub struct EnabledFeature {
    pub feature: Feature,
    pub extension: Arc<Extension>,
}
