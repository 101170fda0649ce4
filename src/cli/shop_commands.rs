// Copyright 2026 Boutique Contributors
// SPDX-License-Identifier: Apache-2.0

//! Slash command parsing and dispatch for the interactive storefront.
//!
//! The storefront session owns the query state and mutates it only here,
//! in response to user input; every mutation resets the page to 1 (via the
//! state mutators) and re-renders by re-running the engine. The engine
//! itself is pure, so rendering is just "recompute and print".

use anyhow::Result;

use crate::browse::{chips, engine};
use crate::cart::{self, Cart, CartStore, OrderLedger};
use crate::catalog::types::{Catalog, QueryState, SortKey, TagFilter};
use crate::cli::output::{format_price, Styled};
use crate::cli::shop_complete::{suggest_command, COMMANDS};
use crate::cli::{browse_cmd, cart_cmd, catalog_cmd};
use crate::params;

/// Session state preserved across commands.
pub struct ShopState {
    pub catalog: Catalog,
    pub query: QueryState,
    pub cart: Cart,
}

impl ShopState {
    pub fn new(catalog: Catalog, cart: Cart) -> Self {
        Self {
            catalog,
            query: QueryState::default(),
            cart,
        }
    }
}

/// Parse and execute a slash command. Returns `true` if the storefront
/// should exit.
pub fn execute(input: &str, state: &mut ShopState) -> Result<bool> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(false);
    }

    // Strip leading / if present
    let input = input.strip_prefix('/').unwrap_or(input);

    // Bare `/` with nothing else → show help
    if input.is_empty() {
        cmd_help();
        return Ok(false);
    }

    // Split into command and arguments
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    match cmd {
        "exit" | "quit" | "q" => return Ok(true),
        "help" | "h" | "?" => cmd_help(),
        "clear" | "cls" => cmd_clear(),
        "browse" | "b" => render(state),
        "filter" | "f" => cmd_filter(args, state),
        "search" | "s" => cmd_search(args, state),
        "price" => cmd_price(args, state),
        "tag" => cmd_tag(args, state),
        "sort" => cmd_sort(args, state),
        "page" | "p" => cmd_page(args, state),
        "chips" => cmd_chips(state),
        "remove" => cmd_remove(args, state),
        "reset" => cmd_reset(state),
        "add" => cmd_add(args, state)?,
        "cart" => cart_cmd::render_cart(&Styled::new(), &state.cart),
        "checkout" => cmd_checkout(state)?,
        "catalog" => catalog_cmd::run_show()?,
        _ => {
            let s = Styled::new();
            if let Some(suggestion) = suggest_command(cmd) {
                eprintln!(
                    "  {} Unknown command '/{cmd}'. Did you mean {}?",
                    s.warn_sym(),
                    s.bold(suggestion)
                );
            } else {
                eprintln!(
                    "  {} Unknown command '/{cmd}'. Type {} for commands.",
                    s.warn_sym(),
                    s.bold("/help")
                );
            }
        }
    }

    Ok(false)
}

/// Recompute the current page and print it.
fn render(state: &ShopState) {
    let page = engine::execute(&state.catalog, &state.query);
    browse_cmd::render_page(&Styled::new(), &page);
}

/// /help — Show available commands.
fn cmd_help() {
    let s = Styled::new();
    eprintln!();
    eprintln!("  {}", s.bold("Commands:"));
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {:<12} {}", s.cyan(cmd), s.dim(desc));
    }
    eprintln!();
    eprintln!(
        "  {}",
        s.dim("Tip: Tab completion works for commands, filter keys, and categories.")
    );
    eprintln!();
}

/// /clear — Clear the terminal.
fn cmd_clear() {
    // ANSI escape to clear screen and move cursor to top-left
    eprint!("\x1b[2J\x1b[H");
}

/// /filter key=value ... — Toggle filter selections.
fn cmd_filter(args: &str, state: &mut ShopState) {
    let s = Styled::new();
    if args.is_empty() {
        eprintln!(
            "  {} Usage: {}",
            s.info_sym(),
            s.bold("/filter category=men size=M color=olive")
        );
        return;
    }

    for token in args.split_whitespace() {
        let Some((key, value)) = token.split_once('=') else {
            eprintln!("  {} Expected key=value, got '{token}'.", s.warn_sym());
            continue;
        };
        match key {
            "category" => state.query.toggle_category(value),
            "size" => state.query.toggle_size(value),
            "color" => state.query.toggle_color(value),
            _ => {
                eprintln!(
                    "  {} Unknown filter key '{key}' (category, size, color).",
                    s.warn_sym()
                );
            }
        }
    }

    render(state);
}

/// /search [term] — Set or clear the search term.
fn cmd_search(args: &str, state: &mut ShopState) {
    state
        .query
        .set_search(if args.is_empty() { None } else { Some(args) });
    render(state);
}

/// /price <min-max> — Set or clear the price range.
fn cmd_price(args: &str, state: &mut ShopState) {
    let s = Styled::new();
    let range = params::parser::parse_price(args);
    if !args.is_empty() && !range.is_set() {
        eprintln!(
            "  {} No effective bounds in '{args}' (zero means unset); price filter cleared.",
            s.info_sym()
        );
    }
    state.query.set_price(range);
    render(state);
}

/// /tag [value] — Set or clear the tag filter.
fn cmd_tag(args: &str, state: &mut ShopState) {
    let s = Styled::new();
    if args.is_empty() {
        state.query.set_tag(None);
        render(state);
        return;
    }

    let tag = TagFilter::from_param(args);
    if let TagFilter::Unrecognized(ref value) = tag {
        eprintln!(
            "  {} Tag '{value}' is not recognized and matches nothing (recognized: flash-sale, featured).",
            s.warn_sym()
        );
    }
    state.query.set_tag(Some(tag));
    render(state);
}

/// /sort <key> — Set the sort order.
fn cmd_sort(args: &str, state: &mut ShopState) {
    let s = Styled::new();
    match args {
        "newest" | "price-asc" | "price-desc" => {
            state.query.set_sort(SortKey::from_param(args));
            render(state);
        }
        _ => {
            eprintln!(
                "  {} Usage: {} (newest, price-asc, price-desc)",
                s.info_sym(),
                s.bold("/sort price-asc")
            );
        }
    }
}

/// /page <n|next|prev> — Move between pages.
///
/// Prev/next stop at the boundaries; an explicit out-of-range number is
/// allowed and renders as an empty page.
fn cmd_page(args: &str, state: &mut ShopState) {
    let s = Styled::new();
    let current = engine::execute(&state.catalog, &state.query);

    match args {
        "next" | "n" => {
            if current.has_next() {
                state.query.page += 1;
            } else {
                eprintln!("  {} Already on the last page.", s.info_sym());
                return;
            }
        }
        "prev" | "p" => {
            if current.has_prev() {
                state.query.page -= 1;
            } else {
                eprintln!("  {} Already on the first page.", s.info_sym());
                return;
            }
        }
        _ => match args.parse::<usize>() {
            Ok(n) if n >= 1 => state.query.page = n,
            _ => {
                eprintln!(
                    "  {} Usage: {}",
                    s.info_sym(),
                    s.bold("/page 2, /page next, /page prev")
                );
                return;
            }
        },
    }

    render(state);
}

/// /chips — List active filters, numbered for /remove.
fn cmd_chips(state: &ShopState) {
    let s = Styled::new();
    let filters = chips::active_filters(&state.query);

    eprintln!();
    if filters.is_empty() {
        eprintln!("  No active filters.");
        eprintln!();
        return;
    }

    for (i, filter) in filters.iter().enumerate() {
        eprintln!("    {:>2}. {}", i + 1, s.cyan(&filter.label));
    }
    eprintln!();
    eprintln!(
        "  {}",
        s.dim(&format!(
            "Remove one with /remove <n>. Current query: {}",
            display_query(&state.query)
        ))
    );
    eprintln!();
}

/// /remove <n> — Remove one active filter.
fn cmd_remove(args: &str, state: &mut ShopState) {
    let s = Styled::new();
    let filters = chips::active_filters(&state.query);

    let index = args.parse::<usize>().ok().filter(|n| (1..=filters.len()).contains(n));
    let Some(index) = index else {
        eprintln!(
            "  {} Usage: {} (see /chips for numbers)",
            s.info_sym(),
            s.bold("/remove 1")
        );
        return;
    };

    state.query = chips::remove_filter(&state.query, &filters[index - 1]);
    render(state);
}

/// /reset — Clear all filters, keep the sort order.
fn cmd_reset(state: &mut ShopState) {
    state.query.clear_filters();
    render(state);
}

/// /add <id> [qty] [size] — Add a product to the cart.
fn cmd_add(args: &str, state: &mut ShopState) -> Result<()> {
    let s = Styled::new();
    let mut tokens = args.split_whitespace();

    let Some(id) = tokens.next() else {
        eprintln!("  {} Usage: {}", s.info_sym(), s.bold("/add <id> [qty] [size]"));
        return Ok(());
    };

    let Some(product) = state.catalog.find(id) else {
        eprintln!("  {} No product '{id}' in the catalog.", s.warn_sym());
        return Ok(());
    };

    // Optional quantity, then optional size (in either order)
    let mut quantity = 1u32;
    let mut size: Option<&str> = None;
    for token in tokens {
        match token.parse::<u32>() {
            Ok(n) if n >= 1 => quantity = n,
            _ => size = Some(token),
        }
    }

    if let Some(size) = size {
        if !product.sizes.iter().any(|v| v.eq_ignore_ascii_case(size)) {
            eprintln!(
                "  {} No size '{size}' for {} (available: {}).",
                s.warn_sym(),
                s.bold(&product.name),
                product.sizes.join(", ")
            );
            return Ok(());
        }
    }

    state.cart.add(product, size, quantity);
    CartStore::default_store().save(&state.cart)?;

    eprintln!(
        "  {} Added {} \u{00d7} {} \u{00b7} cart subtotal {}.",
        s.ok_sym(),
        quantity,
        s.bold(&product.name),
        format_price(state.cart.subtotal())
    );
    Ok(())
}

/// /checkout — Place a pending order and empty the cart.
fn cmd_checkout(state: &mut ShopState) -> Result<()> {
    let s = Styled::new();

    let order = match cart::place_order(&state.cart) {
        Ok(order) => order,
        Err(cart::OrderError::EmptyCart) => {
            eprintln!("  {} Cart is empty; nothing to check out.", s.info_sym());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut ledger = OrderLedger::default_ledger()?;
    ledger.record(&order)?;

    state.cart.clear();
    CartStore::default_store().clear()?;

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
    Ok(())
}

/// Render the current state as its query-string form (for display).
fn display_query(query: &QueryState) -> String {
    let encoded = params::encode(query);
    if encoded.is_empty() {
        "(none)".to_string()
    } else {
        format!("?{encoded}")
    }
}
