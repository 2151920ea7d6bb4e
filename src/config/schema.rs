//! Configuration schema definitions for shapebind.
//!
//! This module contains the struct definitions that map to the
//! `.shapebind/config.yml` file format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::extension::Extension;

/// Root configuration structure for `.shapebind/config.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapesConfig {
    /// Global settings
    pub settings: Settings,

    /// Extension catalog, in registry order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<ExtensionConfig>,

    /// Enabled and excluded features
    pub features: FeaturesConfig,
}

impl ShapesConfig {
    /// Build the runtime extension catalog.
    pub fn extension_catalog(&self) -> Vec<Extension> {
        self.extensions.iter().map(ExtensionConfig::to_extension).collect()
    }
}

/// Global settings that apply to every discovery pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory extension paths resolve against (relative to the project root)
    #[serde(default = "default_content_root")]
    pub content_root: PathBuf,

    /// Do not re-discover when files under the content root change
    #[serde(default, skip_serializing_if = "is_false")]
    pub disable_monitoring: bool,

    /// Minimum milliseconds between content root checks; 0 checks on every lookup
    #[serde(default, skip_serializing_if = "is_zero")]
    pub monitor_interval_ms: u64,

    /// Harvesters by name, in registration order
    #[serde(default = "default_harvesters")]
    pub harvesters: Vec<String>,

    /// Renderers by name, in registration order
    #[serde(default = "default_renderers")]
    pub renderers: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            disable_monitoring: false,
            monitor_interval_ms: 0,
            harvesters: default_harvesters(),
            renderers: default_renderers(),
        }
    }
}

fn default_content_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_harvesters() -> Vec<String> {
    vec!["basic".to_string()]
}

fn default_renderers() -> Vec<String> {
    vec!["html".to_string(), "handlebars".to_string()]
}

fn is_false(v: &bool) -> bool {
    !v
}

fn is_zero(v: &u64) -> bool {
    *v == 0
}

/// One extension (module or theme) and the features it contains.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// Extension id
    pub id: String,

    /// Sub-path under the content root (defaults to the id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Feature ids (defaults to a single feature named after the extension)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl ExtensionConfig {
    /// Effective sub-path.
    pub fn sub_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.id)
    }

    /// Effective feature ids.
    pub fn feature_ids(&self) -> Vec<&str> {
        if self.features.is_empty() {
            vec![self.id.as_str()]
        } else {
            self.features.iter().map(String::as_str).collect()
        }
    }

    /// Convert into a runtime [`Extension`].
    pub fn to_extension(&self) -> Extension {
        Extension::new(&self.id, self.sub_path(), &self.feature_ids())
    }
}

/// Feature state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Enabled feature ids, in the order they are reported
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enabled: Vec<String>,

    /// Feature ids discovery ignores
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<String>,
}
