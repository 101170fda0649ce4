//! CLI handler for `boutique browse "<query>"`.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use crate::browse::engine;
use crate::catalog::types::ResultPage;
use crate::cli::output::{self, format_price, Styled};
use crate::params;
use crate::store::CatalogStore;

/// Run a catalog query expressed as a URL-style query string, e.g.
/// `"category=men&color=olive&sort=price-asc&page=2"`.
pub fn run(query_str: &str, catalog_file: Option<&Path>) -> Result<()> {
    let start = Instant::now();

    let state = params::parse(query_str);
    let catalog = match catalog_file {
        Some(path) => CatalogStore::load_file(path)?,
        None => CatalogStore::default_store().load(),
    };

    let page = engine::execute(&catalog, &state);
    let elapsed = start.elapsed();

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "query": query_str,
            "page": page,
            "duration_us": elapsed.as_micros() as u64,
        }));
        return Ok(());
    }

    let s = Styled::new();
    render_page(&s, &page);

    if !output::is_quiet() {
        let time_str = if elapsed.as_micros() < 1000 {
            format!("{} \u{00b5}s", elapsed.as_micros())
        } else {
            format!("{}ms", elapsed.as_millis())
        };
        eprintln!("  {}", s.dim(&time_str));
    }

    Ok(())
}

/// Render one result page: product rows, active-filter chips, and a
/// count/pagination footer.
pub(crate) fn render_page(s: &Styled, page: &ResultPage) {
    eprintln!();

    if !page.filters.is_empty() {
        let chips: Vec<String> = page
            .filters
            .iter()
            .map(|f| s.cyan(&format!("[{}]", f.label)))
            .collect();
        eprintln!("  Filters: {}", chips.join(" "));
        eprintln!();
    }

    if page.items.is_empty() {
        if page.total_count == 0 {
            eprintln!("  No products match.");
        } else {
            // Out-of-range page: a valid, empty slice
            eprintln!(
                "  Nothing on page {} (of {}).",
                page.page, page.total_pages
            );
        }
        eprintln!();
        return;
    }

    // Compute column widths for clean alignment
    let name_width = page
        .items
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let category_width = page
        .items
        .iter()
        .map(|p| p.categories.join(", ").len())
        .max()
        .unwrap_or(8);

    let id_width = page
        .items
        .iter()
        .map(|p| p.id.len())
        .max()
        .unwrap_or(2)
        .max(2);

    for product in &page.items {
        // Pad before styling so ANSI codes don't skew the columns
        let id = s.dim(&format!("{:<id_width$}", product.id));
        let name = format!("{:<name_width$}", product.name);
        let categories = s.dim(&format!(
            "{:<category_width$}",
            product.categories.join(", ")
        ));
        let price = if product.discount_price.is_some() {
            format!(
                "{} {}",
                s.green(&format!("{:>8}", format_price(product.effective_price()))),
                s.dim(&format!("was {}", format_price(product.price)))
            )
        } else {
            s.green(&format!("{:>8}", format_price(product.price)))
        };

        let mut badges = String::new();
        if product.is_flash_sale {
            badges.push_str(&format!(" {}", s.yellow("flash")));
        }
        if product.is_featured {
            badges.push_str(&format!(" {}", s.blue("featured")));
        }

        eprintln!("  {id} {name} {categories} {price}{badges}");
    }

    // Footer: "9 of 34 products · page 1/4"
    eprintln!();
    let mut footer = format!(
        "  {} of {} products \u{00b7} page {}/{}",
        page.items.len(),
        s.bold(&page.total_count.to_string()),
        page.page,
        page.total_pages.max(1),
    );
    if page.has_prev() {
        footer.push_str(&format!(" \u{00b7} {}", s.dim("prev: page-1")));
    }
    if page.has_next() {
        footer.push_str(&format!(" \u{00b7} {}", s.dim("next: page+1")));
    }
    eprintln!("{footer}");
    eprintln!();
}
