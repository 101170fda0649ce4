//! Query-string codec for the catalog query state.
//!
//! The filter/sort/page selection travels as a flat multi-valued key-value
//! mapping (URL query parameters). The recognized key set is closed;
//! unrecognized keys and malformed values degrade to "no constraint"
//! instead of failing.

pub mod parser;

pub use parser::{encode, parse};
