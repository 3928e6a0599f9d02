//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    /// Dangling link, socket or anything else that is neither
    Other,
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }
}

/// Read-only view of a source tree.
///
/// Classification never writes, so the trait only covers lookups and reads.
/// A path that does not exist is reported through `exists`/`is_file` and is
/// never an error on its own.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// List directory contents (order unspecified)
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    fn join(&self, base: &Path, path: &str) -> PathBuf {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_entry() {
        let entry = DirEntry {
            path: PathBuf::from("/app/manifest.yml"),
            name: "manifest.yml".to_string(),
            file_type: FileType::File,
        };
        assert_eq!(entry.path(), Path::new("/app/manifest.yml"));
        assert_eq!(entry.file_name(), "manifest.yml");
        assert!(entry.is_file());
    }

    #[test]
    fn test_dir_entry_directory_is_not_file() {
        let entry = DirEntry {
            path: PathBuf::from("/app/src"),
            name: "src".to_string(),
            file_type: FileType::Directory,
        };
        assert!(!entry.is_file());
    }
}
