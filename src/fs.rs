//! Filesystem seam.
//!
//! Discovery and loading never touch `std::fs` directly; they go through the
//! [`FileSystem`] trait so the whole pipeline can run against [`LocalFs`] in
//! production and [`MemoryFs`] in tests. An implementation is shared across
//! concurrent read tasks as `Arc<dyn FileSystem>`, hence the `Send + Sync`
//! bound.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

/// The four filesystem operations the aggregator needs.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Names (not full paths) of the entries directly inside `path`, exactly
    /// as stored. Names need not be valid UTF-8.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Whether `path` is a directory. Fails if `path` does not exist.
    fn is_dir(&self, path: &Path) -> io::Result<bool>;

    /// Read a whole file, blocking.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read a whole file without blocking the executor.
    async fn read_file_async(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Produces the filesystem used when none was set explicitly.
pub type FsFactory = fn() -> Arc<dyn FileSystem>;

/// Default [`FsFactory`]: the real filesystem.
pub fn local_fs() -> Arc<dyn FileSystem> {
    Arc::new(LocalFs)
}

/// The real filesystem, via `std::fs` and `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl FileSystem for LocalFs {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect()
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(std::fs::metadata(path)?.is_dir())
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    async fn read_file_async(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// An in-memory tree. Directories are implied by the files beneath them and
/// can also be added empty. `"."` and `""` name the root.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (and its parent directories), builder-style.
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert_file(path, contents);
        self
    }

    /// Add an empty directory (and its parents), builder-style.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let key = lookup_key(path.as_ref());
        self.add_ancestors(&key);
        self.dirs.insert(key);
        self
    }

    pub fn insert_file(&mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        let key = lookup_key(path.as_ref());
        self.add_ancestors(&key);
        self.files.insert(key, contents.into());
    }

    fn add_ancestors(&mut self, key: &Path) {
        for ancestor in key.ancestors().skip(1) {
            if !ancestor.as_os_str().is_empty() {
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    fn dir_exists(&self, key: &Path) -> bool {
        key.as_os_str().is_empty() || self.dirs.contains(key)
    }
}

/// Lookup key: the path without `.` components.
fn lookup_key(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

#[async_trait]
impl FileSystem for MemoryFs {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let key = lookup_key(path);
        if self.files.contains_key(&key) {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("not a directory: {}", path.display()),
            ));
        }
        if !self.dir_exists(&key) {
            return Err(not_found(path));
        }

        let children: BTreeSet<OsString> = self
            .files
            .keys()
            .chain(self.dirs.iter())
            .filter(|entry| entry.parent() == Some(key.as_path()))
            .filter_map(|entry| entry.file_name())
            .map(|name| name.to_os_string())
            .collect();
        Ok(children.into_iter().collect())
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        let key = lookup_key(path);
        if self.dir_exists(&key) {
            Ok(true)
        } else if self.files.contains_key(&key) {
            Ok(false)
        } else {
            Err(not_found(path))
        }
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(&lookup_key(path))
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    async fn read_file_async(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.read_file(path)
    }
}
