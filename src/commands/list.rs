use anyhow::Result;

use crate::application::find_bundles;
use crate::runtime::Runtime;

use super::config::Config;

/// List installed bundles and where their executables live
#[tracing::instrument(skip(runtime, config))]
pub fn list<R: Runtime>(runtime: R, config: Config) -> Result<()> {
    let bundles = find_bundles(&runtime, &config.root)?;

    if bundles.is_empty() {
        println!("No bundles installed in {}.", config.root.display());
        return Ok(());
    }

    for bundle in bundles {
        let bin_dir = bundle.bin_dir();
        if runtime.is_dir(&bin_dir) {
            println!("{}  {}", bundle.name, bin_dir.display());
        } else {
            println!("{}  (no bin directory)", bundle.name);
        }
    }
    Ok(())
}
