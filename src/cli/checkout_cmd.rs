//! `boutique checkout` — place a pending order from the cart.

use anyhow::{Context, Result};

use crate::cart::{self, CartStore, OrderLedger};
use crate::cli::output::{self, format_price, Styled};

/// Validate the cart, record a pending order, and empty the cart.
///
/// Payment collection happens outside this system; the order is recorded
/// with status `pending`.
pub fn run() -> Result<()> {
    let s = Styled::new();
    let store = CartStore::default_store();
    let cart = store.load();

    let order = cart::place_order(&cart).context("checkout")?;

    let mut ledger = OrderLedger::default_ledger().context("opening order ledger")?;
    ledger.record(&order).context("recording order")?;

    store.clear().context("emptying cart")?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "order_id": order.id,
            "total": order.total,
            "status": order.status,
            "lines": order.lines.len(),
        }));
        return Ok(());
    }

    if !output::is_quiet() {
        eprintln!();
        eprintln!(
            "  {} Order {} placed \u{00b7} total {}.",
            s.ok_sym(),
            s.bold(&order.id),
            s.green(&format_price(order.total))
        );
        eprintln!(
            "  {}",
            s.dim("Status: pending. Payment collection is handled outside this tool.")
        );
        eprintln!();
    }

    Ok(())
}
