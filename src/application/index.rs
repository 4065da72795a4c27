//! Reverse index of the symlinks in a directory, keyed by resolved target.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, warn};

use super::scan::list_symlinks;
use crate::runtime::{Runtime, normalize_path, resolve_relative_path};

/// An existing symlink as found in the indexed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedLink {
    /// Path of the symlink itself
    pub path: PathBuf,
    /// The link text exactly as stored on disk
    pub raw_target: PathBuf,
}

/// Maps the absolute, lexically clean target of each symlink in a directory
/// to the symlink pointing at it.
///
/// When two links resolve to the same target, whichever is scanned last wins.
/// Scan order is filesystem-defined, so which one that is remains unspecified.
#[derive(Debug, Default)]
pub struct LinkIndex {
    links: HashMap<PathBuf, IndexedLink>,
}

impl LinkIndex {
    /// Index every symlink directly inside `dir`.
    #[tracing::instrument(skip(runtime))]
    pub fn build<R: Runtime>(runtime: &R, dir: &Path) -> Result<Self> {
        let mut index = Self::default();
        for entry in list_symlinks(runtime, dir)? {
            let path = dir.join(&entry.name);
            let raw_target = match runtime.read_link(&path) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping unreadable symlink {:?}: {:#}", path, e);
                    continue;
                }
            };
            let target = normalize_path(&resolve_relative_path(dir, &raw_target));
            debug!("Indexed {:?} -> {:?}", path, target);
            index.insert(target, IndexedLink { path, raw_target });
        }
        Ok(index)
    }

    /// Record `link` as the symlink pointing at `target`, replacing any previous one.
    pub fn insert(&mut self, target: PathBuf, link: IndexedLink) {
        self.links.insert(target, link);
    }

    /// The symlink pointing at `target`, if any.
    pub fn get(&self, target: &Path) -> Option<&IndexedLink> {
        self.links.get(target)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
