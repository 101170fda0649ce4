//! Boutique — a terminal storefront over a document-backed product catalog.
//!
//! The heart of the crate is a pure browsing pipeline: given the full
//! in-memory product set and a declarative query (filters + sort + page),
//! produce the page of results and its facet metadata. Everything around
//! it (the query-string codec, the file-backed catalog/cart stores, the
//! CLI and interactive storefront) feeds or renders that pipeline.

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod cli;
pub mod params;
pub mod store;
