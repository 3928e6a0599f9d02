use super::{DirEntry, FileSystem, FileType};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Disk-backed file system
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        fs::read_dir(path)
            .with_context(|| format!("cannot list {}", path.display()))?
            .map(|entry| -> Result<DirEntry> {
                let entry = entry.with_context(|| format!("cannot list {}", path.display()))?;
                // Follows symlinks, so a linked manifest counts as a file
                let path = entry.path();
                let file_type = if path.is_file() {
                    FileType::File
                } else if path.is_dir() {
                    FileType::Directory
                } else {
                    FileType::Other
                };
                Ok(DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path,
                    file_type,
                })
            })
            .collect()
    }
}
