//! Symlink operations (create, read, remove).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn symlink_impl(&self, original: &Path, link: &Path) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::symlink as unix_symlink;
            unix_symlink(original, link).with_context(|| {
                format!(
                    "Failed to create symlink {} -> {}",
                    link.display(),
                    original.display()
                )
            })?;
        }
        #[cfg(windows)]
        {
            use std::os::windows::fs::{symlink_dir, symlink_file};
            use tracing::trace;

            // A relative target is relative to the link's parent, not to the CWD.
            let target_path = if original.is_absolute() {
                original.to_path_buf()
            } else {
                link.parent()
                    .context("Failed to get parent directory for symlink")?
                    .join(original)
            };

            if target_path.is_dir() {
                trace!("Target {} is a directory", target_path.display());
                symlink_dir(original, link).with_context(|| {
                    format!("Failed to create directory symlink {}", link.display())
                })?;
            } else {
                symlink_file(original, link).with_context(|| {
                    format!("Failed to create file symlink {}", link.display())
                })?;
            }
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_link_impl(&self, path: &Path) -> Result<PathBuf> {
        fs::read_link(path).with_context(|| format!("Failed to read symlink {}", path.display()))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_symlink_impl(&self, path: &Path) -> Result<()> {
        #[cfg(unix)]
        {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove symlink {}", path.display()))?;
        }
        #[cfg(windows)]
        {
            // Directory symlinks need remove_dir, file symlinks need remove_file.
            fs::remove_dir(path)
                .or_else(|_| fs::remove_file(path))
                .with_context(|| format!("Failed to remove symlink {}", path.display()))?;
        }
        Ok(())
    }
}
