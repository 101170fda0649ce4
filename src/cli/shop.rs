// Copyright 2026 Boutique Contributors
// SPDX-License-Identifier: Apache-2.0

//! Interactive storefront — slash command interface over the catalog.
//!
//! Launch with `boutique` (no subcommand) to enter the interactive mode.
//! Type `/help` for available commands, Tab for completion.

use anyhow::Result;
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

use crate::cart::CartStore;
use crate::cli::output::Styled;
use crate::cli::shop_commands::{self, ShopState};
use crate::cli::shop_complete::ShopHelper;
use crate::store;

/// History file location.
fn history_path() -> std::path::PathBuf {
    store::boutique_home().join("shop_history")
}

/// Print the welcome banner with catalog and cart summary.
fn print_banner(state: &ShopState) {
    let s = Styled::new();

    eprintln!();
    eprintln!(
        "  {} {} {}",
        s.green("\u{25c9}"),
        s.bold(&format!("Boutique v{}", env!("CARGO_PKG_VERSION"))),
        s.dim("— Terminal Storefront")
    );

    let catalog_line = if state.catalog.is_empty() {
        s.yellow("empty — import one with 'boutique catalog import <file>'")
    } else {
        format!("{} products", state.catalog.len())
    };
    eprintln!(
        "    Catalog: {catalog_line} | Cart: {} item(s)",
        state.cart.item_count()
    );

    eprintln!();
    eprintln!(
        "    Press {} to browse commands, {} to complete, {} to quit.",
        s.cyan("/"),
        s.dim("Tab"),
        s.dim("/exit")
    );
    eprintln!();
}

/// Run the interactive storefront.
pub fn run() -> Result<()> {
    // Load the product set once for the whole session; browsing is pure
    // recomputation over this snapshot
    let catalog = crate::store::CatalogStore::default_store().load();
    let cart = CartStore::default_store().load();
    let mut state = ShopState::new(catalog, cart);

    print_banner(&state);

    // Configure rustyline with List completion (shows all matches like Bash)
    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let categories: Vec<String> = state
        .catalog
        .category_counts()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    let helper = ShopHelper::new(categories);
    let mut rl: Editor<ShopHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    // Load history
    let hist_path = history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    // Main loop
    let prompt = format!(
        " {} ",
        if Styled::new().ok_sym() == "OK" {
            "boutique>"
        } else {
            "\x1b[36mboutique>\x1b[0m"
        }
    );

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match shop_commands::execute(line, &mut state) {
                    Ok(true) => {
                        let s = Styled::new();
                        eprintln!("  {} Thanks for shopping!", s.dim("\u{2728}"));
                        break;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        let s = Styled::new();
                        eprintln!("  {} {e:#}", s.fail_sym());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C — don't exit, just show hint
                let s = Styled::new();
                eprintln!("  {} Type {} to quit.", s.dim("(Ctrl+C)"), s.bold("/exit"));
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D — exit
                let s = Styled::new();
                eprintln!("  {} Thanks for shopping!", s.dim("\u{2728}"));
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    // Save history
    let _ = std::fs::create_dir_all(hist_path.parent().unwrap_or(std::path::Path::new(".")));
    let _ = rl.save_history(&hist_path);

    Ok(())
}
