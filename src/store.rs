use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Filesystem operations the patcher needs.
pub trait FileStore {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    /// Regular files below `root`, recursively, sorted by name within each directory.
    /// Symlinks are not followed and are not reported.
    fn files_under(&self, root: &Path) -> io::Result<Vec<PathBuf>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        String::from_utf8(self.read(path)?)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

pub struct DiskStore;

impl FileStore for DiskStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn files_under(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

#[cfg(test)]
pub use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use super::FileStore;
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};
    use std::io;
    use std::path::{Component, Path, PathBuf};

    /// Resolves `.` and `..` lexically, the way the OS would for existing directories.
    fn normalize(path: &Path) -> PathBuf {
        let mut out = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                        out.pop();
                    } else {
                        out.push("..");
                    }
                }
                other => out.push(other),
            }
        }
        out
    }

    /// In-memory tree used by the tests. Directories exist implicitly above every file.
    #[derive(Default)]
    pub struct MemoryStore {
        files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
        dirs: RefCell<BTreeSet<PathBuf>>,
        writes: RefCell<usize>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
            self.insert(path.as_ref(), contents.as_ref().to_vec());
            self
        }

        pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
            self.dirs.borrow_mut().insert(normalize(path.as_ref()));
            self
        }

        pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
            self.files.borrow().get(&normalize(path.as_ref())).cloned()
        }

        pub fn text(&self, path: impl AsRef<Path>) -> Option<String> {
            self.contents(path)
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        }

        /// Number of `write`/`copy` calls so far.
        pub fn write_count(&self) -> usize {
            *self.writes.borrow()
        }

        fn insert(&self, path: &Path, contents: Vec<u8>) {
            let path = normalize(path);
            let mut dirs = self.dirs.borrow_mut();
            for ancestor in path.ancestors().skip(1) {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                dirs.insert(ancestor.to_path_buf());
            }
            self.files.borrow_mut().insert(path, contents);
        }

        fn not_found(path: &Path) -> io::Error {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        }
    }

    impl FileStore for MemoryStore {
        fn exists(&self, path: &Path) -> bool {
            let path = normalize(path);
            self.files.borrow().contains_key(&path) || self.dirs.borrow().contains(&path)
        }

        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.contents(path).ok_or_else(|| Self::not_found(path))
        }

        fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
            if let Some(parent) = normalize(path).parent() {
                if !parent.as_os_str().is_empty() && !self.dirs.borrow().contains(parent) {
                    return Err(Self::not_found(parent));
                }
            }
            *self.writes.borrow_mut() += 1;
            self.insert(path, contents.to_vec());
            Ok(())
        }

        fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
            let contents = self.read(from)?;
            self.write(to, &contents)
        }

        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            let path = normalize(path);
            let mut dirs = self.dirs.borrow_mut();
            for ancestor in path.ancestors() {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                dirs.insert(ancestor.to_path_buf());
            }
            Ok(())
        }

        /// Paths are reported under `root` as given, like `WalkDir` does.
        fn files_under(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
            let normalized = normalize(root);
            if !self.dirs.borrow().contains(&normalized) {
                return Err(Self::not_found(root));
            }
            Ok(self
                .files
                .borrow()
                .keys()
                .filter_map(|path| path.strip_prefix(&normalized).ok())
                .map(|relative| root.join(relative))
                .collect())
        }
    }
}
