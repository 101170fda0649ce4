//! `boutique cart` — manage the cart from the command line.

use anyhow::{bail, Context, Result};

use crate::cart::CartStore;
use crate::cli::output::{self, format_price, Styled};
use crate::store::CatalogStore;

/// Add a product to the cart by id.
pub fn run_add(product_id: &str, quantity: u32, size: Option<&str>) -> Result<()> {
    let s = Styled::new();
    let catalog = CatalogStore::default_store().load();

    let Some(product) = catalog.find(product_id) else {
        bail!("no product '{product_id}' in the catalog");
    };
    if let Some(size) = size {
        if !product.sizes.iter().any(|v| v.eq_ignore_ascii_case(size)) {
            bail!(
                "product '{product_id}' has no size '{size}' (available: {})",
                product.sizes.join(", ")
            );
        }
    }

    let store = CartStore::default_store();
    let mut cart = store.load();
    cart.add(product, size, quantity);
    store.save(&cart).context("saving cart")?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "added": product.id,
            "quantity": quantity.max(1),
            "items": cart.item_count(),
            "subtotal": cart.subtotal(),
        }));
        return Ok(());
    }

    if !output::is_quiet() {
        eprintln!(
            "  {} Added {} to the cart ({} item(s), subtotal {}).",
            s.ok_sym(),
            s.bold(&product.name),
            cart.item_count(),
            format_price(cart.subtotal())
        );
    }

    Ok(())
}

/// Remove a product from the cart.
pub fn run_remove(product_id: &str, size: Option<&str>) -> Result<()> {
    let s = Styled::new();
    let store = CartStore::default_store();
    let mut cart = store.load();

    let removed = cart.remove(product_id, size);
    if removed {
        store.save(&cart).context("saving cart")?;
    }

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "removed": removed,
            "items": cart.item_count(),
        }));
        return Ok(());
    }

    if !output::is_quiet() {
        if removed {
            eprintln!("  {} Removed '{product_id}' from the cart.", s.ok_sym());
        } else {
            eprintln!("  '{product_id}' is not in the cart.");
        }
    }

    Ok(())
}

/// Show cart contents.
pub fn run_show() -> Result<()> {
    let s = Styled::new();
    let cart = CartStore::default_store().load();

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "lines": cart.lines,
            "items": cart.item_count(),
            "subtotal": cart.subtotal(),
        }));
        return Ok(());
    }

    render_cart(&s, &cart);
    Ok(())
}

/// Empty the cart.
pub fn run_clear() -> Result<()> {
    let s = Styled::new();
    let existed = CartStore::default_store().clear().context("clearing cart")?;

    if output::is_json() {
        output::print_json(&serde_json::json!({ "cleared": existed }));
        return Ok(());
    }

    if !output::is_quiet() {
        if existed {
            eprintln!("  {} Cart emptied.", s.ok_sym());
        } else {
            eprintln!("  Cart is already empty.");
        }
    }

    Ok(())
}

/// Render cart contents as aligned rows plus a subtotal footer.
pub(crate) fn render_cart(s: &Styled, cart: &crate::cart::Cart) {
    eprintln!();
    if cart.is_empty() {
        eprintln!(
            "  Cart is empty. Add something with: {}",
            s.bold("boutique cart add <product-id>")
        );
        eprintln!();
        return;
    }

    let name_width = cart
        .lines
        .iter()
        .map(|l| l.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    for line in &cart.lines {
        let size = line
            .size
            .as_deref()
            .map(|v| format!(" ({v})"))
            .unwrap_or_default();
        let name = format!("{:<name_width$}", line.name);
        eprintln!(
            "  {name}{size}  {} \u{00d7} {}  {}",
            line.quantity,
            format_price(line.unit_price),
            s.green(&format_price(line.line_total())),
        );
    }

    eprintln!();
    eprintln!(
        "  {} item(s) \u{00b7} subtotal {}",
        cart.item_count(),
        s.bold(&format_price(cart.subtotal()))
    );
    eprintln!();
}
