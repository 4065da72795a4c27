//! Bundle enumeration - every real subdirectory of the root except `usr`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::scan::list_subdirectories;
use crate::runtime::Runtime;

/// Directory under the root holding the shared `bin`; never a bundle.
pub const RESERVED_DIR: &str = "usr";

/// An installed bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub name: String,
    pub dir: PathBuf,
}

impl Bundle {
    /// The bundle's executables directory
    pub fn bin_dir(&self) -> PathBuf {
        self.dir.join("bin")
    }
}

/// List the bundles installed under `root`, sorted by name.
#[tracing::instrument(skip(runtime))]
pub fn find_bundles<R: Runtime>(runtime: &R, root: &Path) -> Result<Vec<Bundle>> {
    let mut bundles: Vec<Bundle> = list_subdirectories(runtime, root, RESERVED_DIR)?
        .into_iter()
        .map(|entry| Bundle {
            name: entry.name.to_string_lossy().into_owned(),
            dir: root.join(&entry.name),
        })
        .collect();
    bundles.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(bundles)
}
