//! Command layer - resolves configuration, runs use cases, prints for humans.

pub mod config;
mod list;
pub mod paths;
mod prune;
mod sync;

pub use config::{Config, ROOT_ENV};
pub use list::list;
pub use prune::prune;
pub use sync::{BundleReport, SyncOptions, SyncReport, run_sync, sync};
