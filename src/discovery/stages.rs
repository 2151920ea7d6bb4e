//! Named value types for each discovery stage.

use std::fmt;
use std::sync::Arc;

use crate::extension::Extension;
use crate::files::{DirectoryHandle, FileEntry};
use crate::harvest::{HarvestInfo, ShapeHit};
use crate::render::TemplateRenderer;

/// An active extension being processed.
#[derive(Debug, Clone)]
pub struct ExtensionContext {
    pub extension: Arc<Extension>,
}

/// One harvester sub-path under an extension and the files matched there.
#[derive(Debug, Clone)]
pub struct PathContext {
    /// Harvester sub-path, e.g. `Views/Parts`.
    pub sub_path: String,
    /// `<extension sub-path>/<sub-path>`
    pub virtual_path: String,
    /// Resolved directory; `None` when it does not exist.
    pub directory: Option<DirectoryHandle>,
    /// Matched files, in provider order.
    pub files: Vec<FileEntry>,
}

/// A matched template file ready for harvesting.
#[derive(Clone)]
pub struct FileContext {
    pub harvest_info: Arc<HarvestInfo>,
    /// Renderer owning the file's extension (first match wins).
    pub renderer: Arc<dyn TemplateRenderer>,
}

impl fmt::Debug for FileContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileContext")
            .field("harvest_info", &self.harvest_info)
            .field("renderer", &self.renderer.name())
            .finish()
    }
}

/// A shape hit for a file, waiting to be bound to the extension's features.
#[derive(Debug, Clone)]
pub struct ShapeContext {
    pub extension: Arc<Extension>,
    pub file: FileContext,
    pub hit: ShapeHit,
}
