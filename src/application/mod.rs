//! Application layer - the link farm itself.
//!
//! These use cases only log; printing for humans happens in the commands layer.

mod bundles;
mod index;
mod prune;
mod reconcile;
mod scan;

pub use bundles::{Bundle, RESERVED_DIR, find_bundles};
pub use index::{IndexedLink, LinkIndex};
pub use prune::DeadLinkPruner;
pub use reconcile::{LinkAction, Reconciler, SkipReason};
pub use scan::{list_entries, list_subdirectories, list_symlinks};
