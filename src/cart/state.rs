//! Cart contents and their local persistence.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::types::ProductRecord;
use crate::store::StoreError;

/// One product line in the cart. The unit price is the effective price
/// captured at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Add a product to the cart. An existing line for the same product
    /// and size has its quantity bumped instead of duplicating the line.
    pub fn add(&mut self, product: &ProductRecord, size: Option<&str>, quantity: u32) {
        let quantity = quantity.max(1);
        let size = size.map(String::from);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id && l.size == size)
        {
            line.quantity += quantity;
            return;
        }

        self.lines.push(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.effective_price(),
            size,
            quantity,
        });
    }

    /// Remove every line for a product, or only the line with the given
    /// size when one is specified. Returns whether anything was removed.
    pub fn remove(&mut self, product_id: &str, size: Option<&str>) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| {
            l.product_id != product_id || size.is_some_and(|s| l.size.as_deref() != Some(s))
        });
        self.lines.len() != before
    }

    /// Set the quantity of a line; zero removes it. Returns whether the
    /// line existed.
    pub fn set_quantity(&mut self, product_id: &str, size: Option<&str>, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id, size);
        }
        let size = size.map(String::from);
        match self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id && l.size == size)
        {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of items across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// File-backed cart persistence under the boutique home directory.
pub struct CartStore {
    root: PathBuf,
}

impl CartStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn default_store() -> Self {
        Self::open(crate::store::boutique_home())
    }

    pub fn cart_path(&self) -> PathBuf {
        self.root.join("cart.json")
    }

    /// Load the stored cart, degrading to an empty one when the document
    /// is missing or unreadable.
    pub fn load(&self) -> Cart {
        let path = self.cart_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Cart::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(cart) => cart,
            Err(e) => {
                warn!("cart at {} is malformed ({e}); starting empty", path.display());
                Cart::default()
            }
        }
    }

    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)?;
        let raw = serde_json::to_string_pretty(cart)?;
        std::fs::write(self.cart_path(), raw)?;
        Ok(())
    }

    /// Remove the cart document. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, StoreError> {
        let path = self.cart_path();
        if path.exists() {
            std::fs::remove_file(&path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
