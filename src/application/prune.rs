//! Dead link pruning - removes symlinks whose targets no longer exist.

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, warn};

use super::scan::list_symlinks;
use crate::runtime::Runtime;

/// Finds and removes dead symlinks in a single directory.
pub struct DeadLinkPruner<'a, R: Runtime> {
    runtime: &'a R,
    dry_run: bool,
}

impl<'a, R: Runtime> DeadLinkPruner<'a, R> {
    /// Create a new pruner
    pub fn new(runtime: &'a R) -> Self {
        Self {
            runtime,
            dry_run: false,
        }
    }

    /// Only report dead links, never remove them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Symlinks in `dir` whose target is missing.
    ///
    /// A link whose target cannot be stat'ed for any other reason
    /// (permissions, loops) is not considered dead.
    pub fn find_dead_links(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut dead = Vec::new();
        for entry in list_symlinks(self.runtime, dir)? {
            let link = dir.join(&entry.name);
            match self.runtime.try_exists(&link) {
                Ok(true) => {}
                Ok(false) => dead.push(link),
                Err(e) => debug!("Keeping {:?}, cannot check target: {:#}", link, e),
            }
        }
        Ok(dead)
    }

    /// Remove every dead link in `dir` and return the ones that are gone.
    ///
    /// Failing to list `dir` is an error. Failing to remove an individual link is
    /// not: it is logged and the sweep moves on.
    #[tracing::instrument(skip(self))]
    pub fn prune(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let dead = self.find_dead_links(dir)?;
        if self.dry_run {
            return Ok(dead);
        }

        let mut removed = Vec::with_capacity(dead.len());
        for link in dead {
            match self.runtime.remove_symlink(&link) {
                Ok(()) => {
                    debug!("Removed dead link {:?}", link);
                    removed.push(link);
                }
                // Best effort: a link we cannot remove must not stop the sweep
                Err(e) => warn!("Ignoring failure to remove dead link {:?}: {:#}", link, e),
            }
        }
        Ok(removed)
    }
}
