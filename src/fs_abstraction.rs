//! Filesystem abstraction layer for testability
//!
//! Catalog persistence and baseline loading go through [`FileSystem`] so the
//! degradation paths (missing, unreadable, corrupt artifacts) can be exercised
//! with mockall-generated mocks instead of the real filesystem.

use std::io::{self, Write};
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// Trait abstracting the filesystem operations the catalog needs.
///
/// # Example (testing)
/// ```ignore
/// use rangewarden::fs_abstraction::MockFileSystem;
///
/// let mut mock_fs = MockFileSystem::new();
/// mock_fs.expect_exists().returning(|_| true);
/// mock_fs.expect_read_to_string()
///     .returning(|_| Ok("{\"sets\": []}".to_string()));
/// ```
#[cfg_attr(test, automock)]
pub trait FileSystem: Send + Sync {
    /// Read file contents as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Replace `path` with `contents` atomically (temp file + rename).
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Real filesystem implementation using std::fs and tempfile.
#[derive(Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        use tempfile::NamedTempFile;

        // Temp file must live on the same filesystem for rename to be atomic
        let parent_dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        temp_file.write_all(contents)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

static REAL_FS: RealFileSystem = RealFileSystem;

/// Get a reference to the global real filesystem instance.
pub fn real_fs() -> &'static RealFileSystem {
    &REAL_FS
}
