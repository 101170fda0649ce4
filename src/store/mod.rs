//! File-backed product store under the boutique home directory.
//!
//! Stands in for the managed catalog backend at the engine boundary: the
//! full product array is loaded once per invocation, and a fetch failure
//! degrades to an empty product set rather than an error.

pub mod file;

pub use file::{CatalogStore, ImportReport, StoreError};

use std::path::PathBuf;

/// Resolve the boutique home directory (`$BOUTIQUE_HOME`, default
/// `~/.boutique`).
pub fn boutique_home() -> PathBuf {
    if let Ok(p) = std::env::var("BOUTIQUE_HOME") {
        return PathBuf::from(p);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".boutique")
}
