//! Shopping cart and order placement.
//!
//! The cart is a local JSON document; orders are recorded to an
//! append-only ledger. Payment capture is not implemented: checkout
//! records a pending order and nothing more.

pub mod order;
pub mod state;

pub use order::{place_order, Order, OrderError, OrderLedger};
pub use state::{Cart, CartLine, CartStore};
