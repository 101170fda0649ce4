//! `boutique catalog` — manage the stored product catalog.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{self, format_duration, format_price, format_size, Styled};
use crate::store::CatalogStore;

/// Import a catalog document into the store.
pub fn run_import(source: &Path) -> Result<()> {
    let s = Styled::new();
    let store = CatalogStore::default_store();

    let report = store
        .import(source)
        .with_context(|| format!("importing {}", source.display()))?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "imported": report.imported,
            "skipped": report.skipped,
            "path": store.catalog_path(),
        }));
        return Ok(());
    }

    if !output::is_quiet() {
        eprintln!(
            "  {} Imported {} product(s) into {}.",
            s.ok_sym(),
            s.bold(&report.imported.to_string()),
            store.catalog_path().display()
        );
        if report.skipped > 0 {
            eprintln!(
                "  {} Skipped {} invalid record(s); run with --verbose for details.",
                s.warn_sym(),
                report.skipped
            );
        }
    }

    Ok(())
}

/// Show a summary of the stored catalog.
pub fn run_show() -> Result<()> {
    let s = Styled::new();
    let store = CatalogStore::default_store();
    let catalog = store.load();

    if output::is_json() {
        let categories: Vec<serde_json::Value> = catalog
            .category_counts()
            .into_iter()
            .map(|(name, count)| serde_json::json!({ "name": name, "count": count }))
            .collect();
        output::print_json(&serde_json::json!({
            "products": catalog.len(),
            "categories": categories,
            "flash_sale": catalog.products.iter().filter(|p| p.is_flash_sale).count(),
            "featured": catalog.products.iter().filter(|p| p.is_featured).count(),
            "path": store.catalog_path(),
        }));
        return Ok(());
    }

    if catalog.is_empty() {
        eprintln!(
            "  {} No catalog. Import one with: {}",
            s.info_sym(),
            s.bold("boutique catalog import <file.json>")
        );
        return Ok(());
    }

    eprintln!();
    output::print_section(&s, &format!("Catalog ({} products)", catalog.len()));
    eprintln!();

    for (name, count) in catalog.category_counts() {
        eprintln!("    {name:<20} {count:>5}");
    }

    let flash = catalog.products.iter().filter(|p| p.is_flash_sale).count();
    let featured = catalog.products.iter().filter(|p| p.is_featured).count();
    let (min, max) = price_span(&catalog);
    eprintln!();
    output::print_check(s.info_sym(), "Flash sale:", &flash.to_string());
    output::print_check(s.info_sym(), "Featured:", &featured.to_string());
    output::print_check(
        s.info_sym(),
        "Price span:",
        &format!("{} to {}", format_price(min), format_price(max)),
    );

    let path = store.catalog_path();
    if let Ok(meta) = path.metadata() {
        let age = meta
            .modified()
            .ok()
            .and_then(|t| t.elapsed().ok())
            .map(|d| format_duration(d.as_secs()) + " ago")
            .unwrap_or_else(|| "unknown".to_string());
        eprintln!();
        eprintln!(
            "  {} ({}, updated {})",
            path.display(),
            format_size(meta.len()),
            age
        );
    }
    eprintln!();

    Ok(())
}

/// Remove the stored catalog document.
pub fn run_clear() -> Result<()> {
    let s = Styled::new();
    let store = CatalogStore::default_store();
    let existed = store.clear().context("clearing catalog")?;

    if output::is_json() {
        output::print_json(&serde_json::json!({ "cleared": existed }));
        return Ok(());
    }

    if !output::is_quiet() {
        if existed {
            eprintln!("  {} Cleared the stored catalog.", s.ok_sym());
        } else {
            eprintln!("  No stored catalog to clear.");
        }
    }

    Ok(())
}

fn price_span(catalog: &crate::catalog::Catalog) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = 0.0f64;
    for p in &catalog.products {
        let eff = p.effective_price();
        if eff < min {
            min = eff;
        }
        if eff > max {
            max = eff;
        }
    }
    if min.is_infinite() {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}
