//! File providers for locating template files under extensions.
//!
//! Discovery never touches the file system directly. It asks a
//! [`FileProvider`] to resolve an extension's sub-path to a directory and
//! to list the files in it that a [`TemplateMatcher`] accepts.
//!
//! - [`PhysicalFileProvider`] - Directories on disk under a content root
//! - [`TemplateMatcher`] - `*.<ext>` glob set built from renderer extensions

pub mod matcher;
pub mod physical;

pub use matcher::TemplateMatcher;
pub use physical::PhysicalFileProvider;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::extension::Extension;

/// A resolved template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryHandle {
    /// Location on disk.
    pub physical_path: PathBuf,
    /// `<extension sub-path>/<sub-path>`, `/`-separated, without leading `~/`.
    pub virtual_path: String,
}

/// A file found inside a [`DirectoryHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name including its extension.
    pub name: String,
    /// Path relative to the directory, `/`-separated.
    pub relative_path: String,
    /// Location on disk.
    pub physical_path: PathBuf,
}

/// Resolves extension directories and lists their template files.
pub trait FileProvider: Send + Sync {
    /// Resolve `sub_path` under `extension`.
    ///
    /// Returns `Ok(None)` when the directory does not exist. Any other
    /// failure (permissions, broken mounts) is an error.
    fn resolve_directory(
        &self,
        extension: &Extension,
        sub_path: &str,
    ) -> Result<Option<DirectoryHandle>>;

    /// List files in `directory` accepted by `matcher`, in a deterministic order.
    fn list_files(
        &self,
        directory: &DirectoryHandle,
        matcher: &TemplateMatcher,
    ) -> Result<Vec<FileEntry>>;

    /// Root directory watched for changes, if the provider has one.
    fn content_root(&self) -> Option<&Path> {
        None
    }
}

/// Join `/`-separated virtual path segments, skipping empty ones.
pub(crate) fn join_virtual(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_virtual_skips_empty_and_trims() {
        assert_eq!(join_virtual(&["Blog", "Views/"]), "Blog/Views");
        assert_eq!(join_virtual(&["", "Views", "Post.html"]), "Views/Post.html");
        assert_eq!(join_virtual(&["/Themes/TheTheme/", "Views"]), "Themes/TheTheme/Views");
    }
}
