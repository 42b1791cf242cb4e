//! File-based locking to prevent concurrent catalog writers.
//!
//! Uses flock-style advisory locking on a sibling `<output>.lock` file so two
//! operators refreshing the same catalog cannot interleave.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// A guard that holds an exclusive lock for one catalog path.
/// The lock is released when the guard is dropped.
#[derive(Debug)]
pub struct LockGuard {
    _file: File,
    path: PathBuf,
}

/// Lock file used for a given catalog output path.
pub fn lock_path_for(output: &Path) -> PathBuf {
    let mut name: OsString = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("catalog"));
    name.push(".lock");
    output.with_file_name(name)
}

impl LockGuard {
    /// Acquire the lock for `output` without blocking.
    ///
    /// Opens with create+read+write (no truncate) to avoid a TOCTOU race
    /// between file creation and lock acquisition.
    pub fn acquire(output: &Path) -> Result<Self> {
        let path = lock_path_for(output);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("Failed to open lock file: {:?}", path))?;

        file.try_lock_exclusive().map_err(|_| {
            anyhow::anyhow!(
                "Another rangewarden update is already writing {:?}.\n\
                 If you believe this is an error, remove the lock file: {:?}",
                output,
                path
            )
        })?;

        Ok(Self { _file: file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
