use super::{DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
    pub readable: bool,
}

/// In-memory file system for tests.
///
/// Relative paths are resolved against `root` (`/mock` by default).
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            files: RwLock::new(HashMap::new()),
            root: root.clone(),
        };
        fs.add_dir(root);
        fs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.insert_file(path.as_ref(), Some(content.to_string()), true);
    }

    /// Registers a file that exists but fails every read.
    pub fn add_unreadable_file(&self, path: impl AsRef<Path>) {
        self.insert_file(path.as_ref(), None, false);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.write();

        Self::ensure_parents(&mut files, &path);

        files.insert(
            path,
            MockEntry {
                content: None,
                file_type: FileType::Directory,
                readable: true,
            },
        );
    }

    fn insert_file(&self, path: &Path, content: Option<String>, readable: bool) {
        let path = self.normalize_path(path);
        let mut files = self.write();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content,
                file_type: FileType::File,
                readable,
            },
        );
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.files.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.files.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
                readable: true,
            });
        }
    }

    fn entry_type(&self, path: &Path) -> Option<FileType> {
        let path = self.normalize_path(path);
        self.read().get(&path).map(|e| e.file_type)
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.entry_type(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.entry_type(path) == Some(FileType::Directory)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.entry_type(path) == Some(FileType::File)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let files = self.read();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;

        if !entry.readable {
            return Err(anyhow!("Permission denied: {:?}", path));
        }

        entry
            .content
            .clone()
            .ok_or_else(|| anyhow!("Not a file: {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = self.normalize_path(path);
        let files = self.read();

        if !files.contains_key(&path) {
            return Err(anyhow!("Directory not found: {:?}", path));
        }

        let entries = files
            .iter()
            .filter(|(file_path, _)| file_path.parent() == Some(path.as_path()))
            .map(|(file_path, entry)| DirEntry {
                path: file_path.clone(),
                name: file_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("")
                    .to_string(),
                file_type: entry.file_type,
            })
            .collect();

        Ok(entries)
    }
}
