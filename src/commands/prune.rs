use anyhow::Result;
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::application::DeadLinkPruner;
use crate::runtime::Runtime;

use super::config::Config;

/// Remove dead links from the shared bin directory
#[tracing::instrument(skip(runtime, config))]
pub fn prune<R: Runtime>(runtime: R, dry_run: bool, config: Config) -> Result<()> {
    let shared_bin = config.shared_bin();
    debug!("Pruning {:?}", shared_bin);

    if !runtime.is_dir(&shared_bin) {
        println!("Nothing to prune: {} does not exist.", shared_bin.display());
        return Ok(());
    }

    let removed = DeadLinkPruner::new(&runtime)
        .dry_run(dry_run)
        .prune(&shared_bin)?;

    if removed.is_empty() {
        println!("No dead links found.");
    } else {
        print_pruned(&removed, dry_run);
    }
    Ok(())
}

/// Best-effort pruning ahead of linking: a missing directory is skipped and
/// a failure is logged, never returned.
pub(crate) fn prune_before_sync<R: Runtime>(
    runtime: &R,
    shared_bin: &Path,
    dry_run: bool,
) -> Vec<PathBuf> {
    if !runtime.is_dir(shared_bin) {
        debug!("{:?} does not exist, skipping dead link check", shared_bin);
        return Vec::new();
    }

    match DeadLinkPruner::new(runtime).dry_run(dry_run).prune(shared_bin) {
        Ok(removed) => removed,
        Err(e) => {
            warn!("Failed to prune dead links in {:?}: {:#}", shared_bin, e);
            Vec::new()
        }
    }
}

pub(crate) fn print_pruned(links: &[PathBuf], dry_run: bool) {
    let verb = if dry_run {
        "Would remove"
    } else {
        "Removed"
    };
    for link in links {
        println!("{} dead link {}", verb, link.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{symlink_entry, test_root};
    use mockall::predicate::eq;

    #[test]
    fn test_prune_missing_shared_bin_is_not_an_error() {
        let mut runtime = MockRuntime::new();
        let root = test_root();
        runtime
            .expect_is_dir()
            .with(eq(root.join("usr/bin")))
            .returning(|_| false);
        runtime.expect_read_dir().never();

        prune(runtime, false, Config::for_test(root)).unwrap();
    }

    #[test]
    fn test_prune_removes_dead_links() {
        let mut runtime = MockRuntime::new();
        let root = test_root();
        let bin = root.join("usr/bin");

        runtime.expect_is_dir().returning(|_| true);
        runtime
            .expect_read_dir()
            .with(eq(bin.clone()))
            .returning(|_| Ok(vec![symlink_entry("old-tool")]));
        runtime.expect_try_exists().returning(|_| Ok(false));
        runtime
            .expect_remove_symlink()
            .with(eq(bin.join("old-tool")))
            .times(1)
            .returning(|_| Ok(()));

        prune(runtime, false, Config::for_test(root)).unwrap();
    }

    #[test]
    fn test_prune_listing_failure_propagates() {
        let mut runtime = MockRuntime::new();
        runtime.expect_is_dir().returning(|_| true);
        runtime.expect_read_dir().returning(|_| {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
        });

        assert!(prune(runtime, false, Config::for_test(test_root())).is_err());
    }

    #[test]
    fn test_prune_before_sync_swallows_listing_failure() {
        let mut runtime = MockRuntime::new();
        runtime.expect_is_dir().returning(|_| true);
        runtime.expect_read_dir().returning(|_| {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
        });

        let removed = prune_before_sync(&runtime, &test_root().join("usr/bin"), false);
        assert!(removed.is_empty());
    }
}
