//! Template directories on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use crate::error::{Result, ShapeError};
use crate::extension::Extension;

use super::{join_virtual, DirectoryHandle, FileEntry, FileProvider, TemplateMatcher};

/// File provider rooted at a content directory.
///
/// An extension with sub-path `Modules/Blog` and a harvester sub-path
/// `Views` resolves to `<root>/Modules/Blog/Views`.
#[derive(Debug, Clone)]
pub struct PhysicalFileProvider {
    root: PathBuf,
}

impl PhysicalFileProvider {
    /// Create a provider for the given content root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the content root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn physical_path(&self, virtual_path: &str) -> PathBuf {
        virtual_path
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl FileProvider for PhysicalFileProvider {
    fn resolve_directory(
        &self,
        extension: &Extension,
        sub_path: &str,
    ) -> Result<Option<DirectoryHandle>> {
        let virtual_path = join_virtual(&[&extension.sub_path, sub_path]);
        let physical_path = self.physical_path(&virtual_path);

        match fs::metadata(&physical_path) {
            Ok(metadata) if metadata.is_dir() => Ok(Some(DirectoryHandle {
                physical_path,
                virtual_path,
            })),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %physical_path.display(), "Template directory does not exist");
                Ok(None)
            }
            Err(e) => Err(ShapeError::Io(e)),
        }
    }

    fn list_files(
        &self,
        directory: &DirectoryHandle,
        matcher: &TemplateMatcher,
    ) -> Result<Vec<FileEntry>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&directory.physical_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // A link whose target is gone.
                Err(e) if e.io_error().map(|io| io.kind()) == Some(ErrorKind::NotFound) => {
                    trace!(path = ?e.path(), "Skipping broken link");
                    continue;
                }
                Err(e) => {
                    return Err(ShapeError::Walk {
                        path: e
                            .path()
                            .unwrap_or(&directory.physical_path)
                            .to_path_buf(),
                        message: e.to_string(),
                    })
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = match entry.path().strip_prefix(&directory.physical_path) {
                Ok(rel) => rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/"),
                Err(_) => continue,
            };

            if matcher.is_match(&relative) {
                files.push(FileEntry {
                    name: entry.file_name().to_string_lossy().to_string(),
                    relative_path: relative,
                    physical_path: entry.path().to_path_buf(),
                });
            }
        }

        Ok(files)
    }

    fn content_root(&self) -> Option<&Path> {
        Some(&self.root)
    }
}
