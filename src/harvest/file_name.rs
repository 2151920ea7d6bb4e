//! Harvester that uses the file name verbatim.

use crate::error::Result;

use super::{HarvestInfo, ShapeHit, TemplateHarvester};

/// The file name without its extension is the shape type.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileNameHarvester;

impl FileNameHarvester {
    /// Configuration name.
    pub const NAME: &'static str = "file_name";
}

impl TemplateHarvester for FileNameHarvester {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn sub_paths(&self) -> Vec<String> {
        vec!["Views".to_string()]
    }

    fn harvest_shape(&self, info: &HarvestInfo) -> Result<Vec<ShapeHit>> {
        if info.file_name.is_empty() {
            return Ok(vec![]);
        }
        Ok(vec![ShapeHit::new(info.file_name.clone())])
    }
}
