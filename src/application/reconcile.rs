//! Link reconciliation - exposes every entry of a bundle's bin directory in the
//! shared bin directory without disturbing links that already exist.
//!
//! Each entry ends up in one of three states:
//! - unlinked: a new relative symlink is created (`LinkAction::Create`)
//! - linked under the same name: nothing to do (`LinkAction::Skip`)
//! - linked under another name: reported and left alone (`LinkAction::Conflict`)
//!
//! Re-running against an unchanged bundle only ever produces `Skip`.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info, warn};
use serde::Serialize;

use super::index::LinkIndex;
use super::scan::list_entries;
use crate::runtime::{Runtime, normalize_path, relative_path_from_dir};

/// Why an entry needs no link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A link with the same name already points at the entry
    AlreadyLinked,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyLinked => write!(f, "already linked"),
        }
    }
}

/// The decision taken for one entry of a bundle's bin directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LinkAction {
    /// Create a symlink at `link` whose text is `dest`
    Create { link: PathBuf, dest: PathBuf },
    /// Nothing to do for the link at `link`
    Skip { link: PathBuf, reason: SkipReason },
    /// `existing` (with link text `existing_target`) already exposes `wanted`
    /// under a different name
    Conflict {
        existing: PathBuf,
        existing_target: PathBuf,
        wanted: PathBuf,
    },
}

impl LinkAction {
    pub fn is_mutation(&self) -> bool {
        matches!(self, LinkAction::Create { .. })
    }
}

/// Reconciles a shared bin directory against one bundle bin directory at a time.
pub struct Reconciler<'a, R: Runtime> {
    runtime: &'a R,
}

impl<'a, R: Runtime> Reconciler<'a, R> {
    /// Create a new reconciler
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    /// Create the shared bin directory (and parents) if it does not exist yet.
    pub fn ensure_shared_bin(&self, shared_bin: &Path) -> Result<()> {
        self.runtime.create_dir_all(shared_bin)
    }

    /// Decide what to do for every entry of `bundle_bin`, without touching the disk.
    ///
    /// A shared bin directory that does not exist yet is treated as empty.
    #[tracing::instrument(skip(self))]
    pub fn plan(&self, shared_bin: &Path, bundle_bin: &Path) -> Result<Vec<LinkAction>> {
        let index = if self.runtime.is_dir(shared_bin) {
            LinkIndex::build(self.runtime, shared_bin)?
        } else {
            debug!("{:?} does not exist yet, nothing is linked", shared_bin);
            LinkIndex::default()
        };

        let entries = list_entries(self.runtime, bundle_bin)?;
        debug!(
            "Planning {} entries of {:?} against {} existing links",
            entries.len(),
            bundle_bin,
            index.len()
        );

        Ok(entries
            .iter()
            .map(|entry| decide(&index, shared_bin, bundle_bin, Path::new(&entry.name)))
            .collect())
    }

    /// Carry out a planned action. Only `Create` touches the disk.
    pub fn apply(&self, action: &LinkAction) -> Result<()> {
        match action {
            LinkAction::Create { link, dest } => {
                info!("Linking {:?} -> {:?}", link, dest);
                self.runtime.symlink(dest, link)
            }
            LinkAction::Skip { link, reason } => {
                debug!("Skipping {:?}: {}", link, reason);
                Ok(())
            }
            LinkAction::Conflict {
                existing,
                existing_target,
                wanted,
            } => {
                warn!(
                    "{:?} links to {:?}, not relinking to {:?}",
                    existing, existing_target, wanted
                );
                Ok(())
            }
        }
    }

    /// Make sure `shared_bin` exists, then plan and apply links for `bundle_bin`.
    ///
    /// The first failing symlink aborts the call; links created before it stay.
    #[tracing::instrument(skip(self))]
    pub fn reconcile(&self, shared_bin: &Path, bundle_bin: &Path) -> Result<Vec<LinkAction>> {
        self.ensure_shared_bin(shared_bin)?;
        let actions = self.plan(shared_bin, bundle_bin)?;
        for action in &actions {
            self.apply(action)?;
        }
        Ok(actions)
    }
}

/// Decide the action for the entry `name` of `bundle_bin`.
fn decide(index: &LinkIndex, shared_bin: &Path, bundle_bin: &Path, name: &Path) -> LinkAction {
    let target = normalize_path(&bundle_bin.join(name));

    match index.get(&target) {
        Some(existing) if existing.path.file_name() == Some(name.as_os_str()) => {
            LinkAction::Skip {
                link: existing.path.clone(),
                reason: SkipReason::AlreadyLinked,
            }
        }
        Some(existing) => LinkAction::Conflict {
            existing: existing.path.clone(),
            existing_target: existing.raw_target.clone(),
            wanted: target,
        },
        None => {
            let dest = relative_path_from_dir(shared_bin, &target).unwrap_or(target);
            LinkAction::Create {
                link: shared_bin.join(name),
                dest,
            }
        }
    }
}
