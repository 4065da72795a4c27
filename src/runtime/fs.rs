//! File system operations (directory listing, creation, existence probing).

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::{DirectoryEntry, RealRuntime};

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_dir_impl(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        let entries = fs::read_dir(path)
            .with_context(|| format!("Failed to read directory {}", path.display()))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("Failed to read entry in {}", path.display()))?;
            // DirEntry::metadata does not traverse symlinks
            let metadata = entry
                .metadata()
                .with_context(|| format!("Failed to stat {}", entry.path().display()))?;
            let file_type = metadata.file_type();
            result.push(DirectoryEntry {
                name: entry.file_name(),
                is_dir: file_type.is_dir(),
                is_symlink: file_type.is_symlink(),
                mode: file_mode(&metadata),
            });
        }
        Ok(result)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_dir_impl(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn try_exists_impl(&self, path: &Path) -> Result<bool> {
        match fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to stat {}", path.display())),
        }
    }
}

#[cfg(unix)]
fn file_mode(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn file_mode(metadata: &fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}
