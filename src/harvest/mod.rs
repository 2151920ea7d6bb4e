//! Template harvesting.
//!
//! A [`TemplateHarvester`] declares the sub-paths under which it expects
//! templates and proposes zero or more [`ShapeHit`]s for each candidate
//! file described by a [`HarvestInfo`]. Harvesters are pure: the same
//! input always yields the same hits.
//!
//! - [`BasicHarvester`] - Alternates (`-`) and display types (`.`) encoded in file names
//! - [`FileNameHarvester`] - File name without extension is the shape type

pub mod basic;
pub mod file_name;
pub mod set;

pub use basic::BasicHarvester;
pub use file_name::FileNameHarvester;
pub use set::HarvesterSet;

use serde::Serialize;
use std::path::PathBuf;

use crate::error::{Result, ShapeError};

/// Descriptor of one candidate template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarvestInfo {
    /// Harvester sub-path the file was found under (e.g. `Views/Parts`).
    pub sub_path: String,
    /// File name without its extension.
    pub file_name: String,
    /// `~/<extension sub-path>/<sub-path>/<file name>.<ext>`
    pub template_virtual_path: String,
    /// Location on disk.
    pub physical_path: PathBuf,
}

impl HarvestInfo {
    /// File extension of the template, without the leading dot.
    pub fn template_extension(&self) -> Option<&str> {
        let file = self
            .template_virtual_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.template_virtual_path);
        match file.rfind('.') {
            Some(dot) if dot > 0 && dot + 1 < file.len() => Some(&file[dot + 1..]),
            _ => None,
        }
    }
}

/// A shape proposed by a harvester for a template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeHit {
    /// Shape type the template renders.
    pub shape_type: String,
    /// Display type encoded in the file name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

impl ShapeHit {
    /// Create a hit without a display type.
    pub fn new(shape_type: impl Into<String>) -> Self {
        Self {
            shape_type: shape_type.into(),
            display_type: None,
        }
    }

    /// Attach a display type.
    pub fn with_display_type(mut self, display_type: impl Into<String>) -> Self {
        self.display_type = Some(display_type.into());
        self
    }
}

/// Strategy that proposes shape bindings for template files.
pub trait TemplateHarvester: Send + Sync {
    /// Name used in configuration and error messages.
    fn name(&self) -> &str;

    /// Logical roots under an extension where templates are expected.
    ///
    /// Must not change during a discovery pass.
    fn sub_paths(&self) -> Vec<String>;

    /// Propose shape hits for one file. May return an empty list.
    fn harvest_shape(&self, info: &HarvestInfo) -> Result<Vec<ShapeHit>>;
}

/// Check that a harvester sub-path stays inside the extension.
///
/// Returns the sub-path normalized to `/` separators without surrounding slashes.
pub fn validate_sub_path(harvester: &str, sub_path: &str) -> Result<String> {
    let normalized = sub_path.replace('\\', "/");
    let invalid = normalized.trim().is_empty()
        || normalized.starts_with('/')
        || normalized.contains(':')
        || normalized.split('/').any(|segment| segment == "..");

    if invalid {
        return Err(ShapeError::InvalidSubPath {
            harvester: harvester.to_string(),
            sub_path: sub_path.to_string(),
        });
    }

    Ok(normalized.trim_matches('/').to_string())
}
