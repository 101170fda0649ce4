//! Order placement — append-only JSONL ledger of checkouts.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::cart::state::{Cart, CartLine};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("order ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("order could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A placed order. Status stays `pending`; payment capture happens
/// outside this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
    pub total: f64,
    pub status: String,
}

/// Turn a cart into a pending order. Rejects an empty cart.
pub fn place_order(cart: &Cart) -> Result<Order, OrderError> {
    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }
    Ok(Order {
        id: Uuid::new_v4().to_string(),
        created_at: Utc::now(),
        lines: cart.lines.clone(),
        total: cart.subtotal(),
        status: "pending".to_string(),
    })
}

/// Append-only JSONL order ledger.
pub struct OrderLedger {
    file: File,
}

impl OrderLedger {
    /// Open or create the ledger file.
    pub fn open(path: &PathBuf) -> Result<Self, OrderError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Open the default ledger at `<home>/orders.jsonl`.
    pub fn default_ledger() -> Result<Self, OrderError> {
        let path = crate::store::boutique_home().join("orders.jsonl");
        Self::open(&path)
    }

    /// Record an order as one JSON line.
    pub fn record(&mut self, order: &Order) -> Result<(), OrderError> {
        let json = serde_json::to_string(order)?;
        writeln!(self.file, "{json}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::ProductRecord;
    use chrono::TimeZone;

    fn cart_with_items() -> Cart {
        let product = ProductRecord {
            id: "p1".to_string(),
            name: "Field Jacket".to_string(),
            categories: vec!["men".to_string()],
            price: 120.0,
            discount_price: Some(90.0),
            images: vec!["p1-main".to_string()],
            sizes: vec!["M".to_string()],
            colors: Vec::new(),
            tags: Vec::new(),
            is_featured: false,
            is_flash_sale: false,
            created_at: Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap(),
        };
        let mut cart = Cart::default();
        cart.add(&product, Some("M"), 2);
        cart
    }

    #[test]
    fn test_place_order_totals_cart() {
        let order = place_order(&cart_with_items()).unwrap();
        assert_eq!(order.total, 180.0);
        assert_eq!(order.status, "pending");
        assert_eq!(order.lines.len(), 1);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        assert!(matches!(
            place_order(&Cart::default()),
            Err(OrderError::EmptyCart)
        ));
    }

    #[test]
    fn test_ledger_appends_one_line_per_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.jsonl");

        let mut ledger = OrderLedger::open(&path).unwrap();
        let cart = cart_with_items();
        ledger.record(&place_order(&cart).unwrap()).unwrap();
        ledger.record(&place_order(&cart).unwrap()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let order: Order = serde_json::from_str(line).unwrap();
            assert_eq!(order.total, 180.0);
        }
    }
}
