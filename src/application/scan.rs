//! Directory scanning - immediate entries of a directory, optionally filtered.
//!
//! Listing order is whatever the filesystem yields; callers must not rely on it.

use std::path::Path;

use anyhow::Result;

use crate::runtime::{DirectoryEntry, Runtime};

/// List every immediate entry of `dir`.
pub fn list_entries<R: Runtime>(runtime: &R, dir: &Path) -> Result<Vec<DirectoryEntry>> {
    runtime.read_dir(dir)
}

/// List real subdirectories of `dir`, skipping the one named `exclude_name`.
/// Symlinks to directories are not subdirectories.
pub fn list_subdirectories<R: Runtime>(
    runtime: &R,
    dir: &Path,
    exclude_name: &str,
) -> Result<Vec<DirectoryEntry>> {
    Ok(list_entries(runtime, dir)?
        .into_iter()
        .filter(|e| e.is_dir && e.name != exclude_name)
        .collect())
}

/// List the symlinks directly inside `dir`.
pub fn list_symlinks<R: Runtime>(runtime: &R, dir: &Path) -> Result<Vec<DirectoryEntry>> {
    Ok(list_entries(runtime, dir)?
        .into_iter()
        .filter(|e| e.is_symlink)
        .collect())
}
