//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over system operations,
//! enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `path` - Path utility functions (normalize, relative paths)
//! - `env` - Environment variables and well-known directories
//! - `fs` - File system operations (list, create, probe)
//! - `symlink` - Symlink operations (create, read, remove)

mod env;
mod fs;
pub mod path;
mod symlink;

use anyhow::Result;
use std::env as std_env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub use path::{normalize_path, relative_path_from_dir, resolve_relative_path};

/// One entry of a directory listing.
///
/// The file type is taken from the entry itself, so a symlink to a directory
/// reports `is_symlink` and not `is_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: OsString,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub mode: u32,
}

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
    fn home_dir(&self) -> Option<PathBuf>;
    fn current_dir(&self) -> Result<PathBuf>;

    // File System
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn read_dir(&self, path: &Path) -> Result<Vec<DirectoryEntry>>;
    fn is_dir(&self, path: &Path) -> bool;

    /// Check whether `path` exists, following symlinks.
    /// Returns `Ok(false)` only when the path (or a link's target) is not found;
    /// any other failure to stat the path is an error.
    fn try_exists(&self, path: &Path) -> Result<bool>;

    // Symlinks
    fn symlink(&self, original: &Path, link: &Path) -> Result<()>;
    fn read_link(&self, path: &Path) -> Result<PathBuf>;
    fn remove_symlink(&self, path: &Path) -> Result<()>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        self.current_dir_impl()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        self.read_dir_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn try_exists(&self, path: &Path) -> Result<bool> {
        self.try_exists_impl(path)
    }

    fn symlink(&self, original: &Path, link: &Path) -> Result<()> {
        self.symlink_impl(original, link)
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf> {
        self.read_link_impl(path)
    }

    fn remove_symlink(&self, path: &Path) -> Result<()> {
        self.remove_symlink_impl(path)
    }
}
