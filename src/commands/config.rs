use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::application::RESERVED_DIR;
use crate::runtime::{Runtime, normalize_path};

use super::paths::resolve_root;

/// Environment variable naming the bundle root
pub const ROOT_ENV: &str = "BUNDLE_PATH";

/// Settings shared by every command, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute, normalized bundle root
    pub root: PathBuf,
}

impl Config {
    /// Resolve the configured root value (from `--root` or `BUNDLE_PATH`).
    pub fn new<R: Runtime>(runtime: &R, root: Option<String>) -> Result<Self> {
        let value = root.unwrap_or_default();
        let home = runtime.home_dir();
        let resolved = resolve_root(&value, home.as_deref(), |name| runtime.env_var(name).ok())?;

        let root = if resolved.is_absolute() {
            resolved
        } else {
            runtime.current_dir()?.join(resolved)
        };
        let root = normalize_path(&root);
        debug!("Using bundle root {:?}", root);

        Ok(Self { root })
    }

    /// The directory every bundle's executables are linked into
    pub fn shared_bin(&self) -> PathBuf {
        self.root.join(RESERVED_DIR).join("bin")
    }

    #[cfg(test)]
    pub fn for_test(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}
