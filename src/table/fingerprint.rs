//! Content root fingerprints for change monitoring.

use sha2::{Digest, Sha256};
use std::path::Path;
use walkdir::WalkDir;

/// Hash of every file's relative path, size and modification time under a root.
///
/// Two fingerprints differ when a file was added, removed, resized or
/// touched. Hidden entries (names starting with `.`) are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFingerprint(String);

impl ContentFingerprint {
    /// Fingerprint the tree under `root`. Unreadable entries are skipped.
    pub fn compute(root: &Path) -> Self {
        let mut hasher = Sha256::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
            });

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            hasher.update(relative.to_string_lossy().as_bytes());

            if let Ok(metadata) = entry.metadata() {
                hasher.update(metadata.len().to_le_bytes());
                if let Ok(mtime) = metadata.modified() {
                    hasher.update(format!("{:?}", mtime).as_bytes());
                }
            }
        }

        let result = hasher.finalize();
        Self(hex::encode(&result[..16]))
    }

    /// Hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn stable_for_unchanged_tree() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("Blog/Views")).unwrap();
        fs::write(temp.path().join("Blog/Views/Post.html"), "a").unwrap();

        let first = ContentFingerprint::compute(temp.path());
        let second = ContentFingerprint::compute(temp.path());
        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), 32);
    }

    #[test]
    fn changes_when_file_added() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("Blog/Views")).unwrap();
        fs::write(temp.path().join("Blog/Views/Post.html"), "a").unwrap();
        let before = ContentFingerprint::compute(temp.path());

        fs::write(temp.path().join("Blog/Views/Menu.html"), "b").unwrap();
        let after = ContentFingerprint::compute(temp.path());
        assert_ne!(before, after);
    }

    #[test]
    fn changes_when_file_resized() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Post.html"), "a").unwrap();
        let before = ContentFingerprint::compute(temp.path());

        fs::write(temp.path().join("Post.html"), "longer content").unwrap();
        assert_ne!(before, ContentFingerprint::compute(temp.path()));
    }

    #[test]
    fn ignores_hidden_entries() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Post.html"), "a").unwrap();
        let before = ContentFingerprint::compute(temp.path());

        fs::create_dir_all(temp.path().join(".shapebind")).unwrap();
        fs::write(temp.path().join(".shapebind/config.yml"), "x: 1").unwrap();
        assert_eq!(before, ContentFingerprint::compute(temp.path()));
    }
}
