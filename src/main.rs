//! Boutique CLI entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use boutique::cli;

#[derive(Parser)]
#[command(
    name = "boutique",
    version,
    about = "Terminal storefront — browse, filter, and shop a product catalog",
    arg_required_else_help = false
)]
struct Cli {
    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Query the catalog with a URL-style query string
    Browse {
        /// e.g. "category=men&color=olive&sort=price-asc&page=2"
        #[arg(default_value = "")]
        query: String,
        /// Query a catalog file instead of the stored one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Enter the interactive storefront
    Shop,
    /// Manage the stored product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place a pending order from the cart
    Checkout,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Import a catalog document (JSON array of products)
    Import { file: PathBuf },
    /// Show a summary of the stored catalog
    Show,
    /// Remove the stored catalog
    Clear,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product by id
    Add {
        product_id: String,
        /// Quantity to add
        #[arg(long, short = 'n', default_value_t = 1)]
        qty: u32,
        /// Size label, when the product has sizes
        #[arg(long)]
        size: Option<String>,
    },
    /// Remove a product (optionally one size only)
    Rm {
        product_id: String,
        #[arg(long)]
        size: Option<String>,
    },
    /// Show cart contents
    Show,
    /// Empty the cart
    Clear,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Output-mode flags travel as env vars so every layer sees them
    if args.json {
        std::env::set_var("BOUTIQUE_JSON", "1");
    }
    if args.quiet {
        std::env::set_var("BOUTIQUE_QUIET", "1");
    }
    if args.verbose {
        std::env::set_var("BOUTIQUE_VERBOSE", "1");
    }
    if args.no_color {
        std::env::set_var("BOUTIQUE_NO_COLOR", "1");
    }

    init_tracing(args.verbose);

    match args.command {
        None | Some(Command::Shop) => cli::shop::run(),
        Some(Command::Browse { query, catalog }) => {
            cli::browse_cmd::run(&query, catalog.as_deref())
        }
        Some(Command::Catalog { action }) => match action {
            CatalogAction::Import { file } => cli::catalog_cmd::run_import(&file),
            CatalogAction::Show => cli::catalog_cmd::run_show(),
            CatalogAction::Clear => cli::catalog_cmd::run_clear(),
        },
        Some(Command::Cart { action }) => match action {
            CartAction::Add {
                product_id,
                qty,
                size,
            } => cli::cart_cmd::run_add(&product_id, qty, size.as_deref()),
            CartAction::Rm { product_id, size } => {
                cli::cart_cmd::run_remove(&product_id, size.as_deref())
            }
            CartAction::Show => cli::cart_cmd::run_show(),
            CartAction::Clear => cli::cart_cmd::run_clear(),
        },
        Some(Command::Checkout) => cli::checkout_cmd::run(),
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Logs go to stderr; data output owns stdout.
fn init_tracing(verbose: bool) {
    let default = if verbose { "boutique=debug" } else { "boutique=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
