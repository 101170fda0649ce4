//! Catalog data structures and query operations.
//!
//! The Catalog is Boutique's primary data structure — the full set of
//! product records for a storefront, loaded once per invocation and treated
//! as immutable while browsing. Filtering, sorting, and pagination are pure
//! scans over this in-memory set; nothing here performs I/O.

pub mod reader;
pub mod types;

pub use types::*;
