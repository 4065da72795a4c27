use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::application::{Bundle, LinkAction, Reconciler, find_bundles};
use crate::runtime::Runtime;

use super::config::Config;
use super::prune::{print_pruned, prune_before_sync};

/// Options for a sync run
#[derive(Debug, Default, Clone, Copy)]
pub struct SyncOptions {
    /// Report what would change without touching the disk
    pub dry_run: bool,
    /// Continue with the remaining bundles when one fails
    pub keep_going: bool,
    /// Print a JSON report instead of one line per change
    pub json: bool,
}

/// What a sync run did (or would do)
#[derive(Debug, Serialize)]
pub struct SyncReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub pruned: Vec<PathBuf>,
    pub bundles: Vec<BundleReport>,
}

#[derive(Debug, Serialize)]
pub struct BundleReport {
    pub name: String,
    pub actions: Vec<LinkAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncReport {
    /// Number of bundles that could not be linked
    pub fn failed(&self) -> usize {
        self.bundles.iter().filter(|b| b.error.is_some()).count()
    }
}

/// Prune dead links, then link every installed bundle into the shared bin directory
#[tracing::instrument(skip(runtime, config))]
pub fn sync<R: Runtime>(runtime: R, options: SyncOptions, config: Config) -> Result<()> {
    let report = run_sync(&runtime, options, &config)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let failed = report.failed();
    if failed > 0 {
        anyhow::bail!("{} of {} bundle(s) failed to link", failed, report.bundles.len());
    }
    Ok(())
}

/// Run the sync flow and collect the report.
///
/// Without `keep_going` the first failing bundle aborts the run with its error.
/// With it, failures are recorded in the report and the remaining bundles are
/// still processed.
pub fn run_sync<R: Runtime>(runtime: &R, options: SyncOptions, config: &Config) -> Result<SyncReport> {
    let shared_bin = config.shared_bin();

    let pruned = prune_before_sync(runtime, &shared_bin, options.dry_run);
    if !options.json {
        print_pruned(&pruned, options.dry_run);
    }

    let bundles = find_bundles(runtime, &config.root)?;
    debug!("Found {} bundle(s) in {:?}", bundles.len(), config.root);

    let reconciler = Reconciler::new(runtime);
    let mut report = SyncReport {
        root: config.root.clone(),
        dry_run: options.dry_run,
        pruned,
        bundles: Vec::with_capacity(bundles.len()),
    };

    for bundle in bundles {
        let mut actions = Vec::new();
        let result = link_bundle(&reconciler, &shared_bin, &bundle, options, &mut actions)
            .with_context(|| format!("Failed to link bundle {}", bundle.name));

        let error = match result {
            Ok(()) => None,
            Err(e) if options.keep_going => {
                if !options.json {
                    eprintln!("Error: {:#}", e);
                }
                Some(format!("{:#}", e))
            }
            Err(e) => return Err(e),
        };

        report.bundles.push(BundleReport {
            name: bundle.name,
            actions,
            error,
        });
    }

    Ok(report)
}

fn link_bundle<R: Runtime>(
    reconciler: &Reconciler<'_, R>,
    shared_bin: &Path,
    bundle: &Bundle,
    options: SyncOptions,
    actions: &mut Vec<LinkAction>,
) -> Result<()> {
    info!("Linking bundle {}", bundle.name);

    if !options.dry_run {
        reconciler.ensure_shared_bin(shared_bin)?;
    }

    for action in reconciler.plan(shared_bin, &bundle.bin_dir())? {
        if !options.json {
            print_action(&action, options.dry_run);
        }
        if !options.dry_run {
            reconciler.apply(&action)?;
        }
        actions.push(action);
    }
    Ok(())
}

pub(crate) fn print_action(action: &LinkAction, dry_run: bool) {
    match action {
        LinkAction::Create { link, dest } => {
            if dry_run {
                println!("Would link {} -> {}", link.display(), dest.display());
            } else {
                println!("{} -> {}", link.display(), dest.display());
            }
        }
        LinkAction::Skip { .. } => {}
        LinkAction::Conflict {
            existing,
            existing_target,
            wanted,
        } => {
            eprintln!(
                "WARNING: {} link to {}, can not relink to {}",
                existing.display(),
                existing_target.display(),
                wanted.display()
            );
        }
    }
}
