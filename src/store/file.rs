//! Catalog document storage and validation.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::types::{Catalog, ProductRecord};

/// Errors from explicit store operations (import/save/clear).
///
/// Plain loads never surface these; they degrade to an empty catalog.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("catalog I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Outcome of a catalog import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// File-backed catalog store rooted at the boutique home directory.
pub struct CatalogStore {
    root: PathBuf,
}

impl CatalogStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store at the default home location.
    pub fn default_store() -> Self {
        Self::open(super::boutique_home())
    }

    /// Location of the catalog document.
    pub fn catalog_path(&self) -> PathBuf {
        self.root.join("catalog.json")
    }

    /// Load the stored catalog, degrading to an empty one when the
    /// document is missing or unreadable.
    pub fn load(&self) -> Catalog {
        let path = self.catalog_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                info!("no catalog at {} ({e}); starting empty", path.display());
                return Catalog::default();
            }
        };
        match serde_json::from_str::<Vec<ProductRecord>>(&raw) {
            Ok(products) => {
                let (catalog, report) = normalize(products);
                if report.skipped > 0 {
                    warn!(
                        "dropped {} invalid record(s) while loading {}",
                        report.skipped,
                        path.display()
                    );
                }
                catalog
            }
            Err(e) => {
                warn!("catalog at {} is malformed ({e}); starting empty", path.display());
                Catalog::default()
            }
        }
    }

    /// Strictly load a catalog document from an arbitrary path.
    pub fn load_file(path: &Path) -> Result<Catalog, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        let products: Vec<ProductRecord> = serde_json::from_str(&raw)?;
        let (catalog, report) = normalize(products);
        if report.skipped > 0 {
            warn!(
                "dropped {} invalid record(s) while loading {}",
                report.skipped,
                path.display()
            );
        }
        Ok(catalog)
    }

    /// Import a catalog document into the store, validating records on
    /// the way in.
    pub fn import(&self, source: &Path) -> Result<ImportReport, StoreError> {
        let raw = std::fs::read_to_string(source)?;
        let products: Vec<ProductRecord> = serde_json::from_str(&raw)?;
        let (catalog, report) = normalize(products);
        self.save(&catalog)?;
        info!(
            "imported {} product(s) from {} ({} skipped)",
            report.imported,
            source.display(),
            report.skipped
        );
        Ok(report)
    }

    /// Write the catalog document.
    pub fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)?;
        let raw = serde_json::to_string_pretty(&catalog.products)?;
        std::fs::write(self.catalog_path(), raw)?;
        Ok(())
    }

    /// Remove the catalog document. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, StoreError> {
        let path = self.catalog_path();
        if path.exists() {
            std::fs::remove_file(&path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Enforce the record invariants, permissively.
///
/// Records with a non-positive price or no images are skipped; a discount
/// at or above the base price is dropped from the record. Everything else
/// passes through unchanged.
fn normalize(products: Vec<ProductRecord>) -> (Catalog, ImportReport) {
    let total = products.len();
    let mut kept = Vec::with_capacity(total);

    for mut product in products {
        if product.price <= 0.0 || !product.price.is_finite() {
            warn!("skipping '{}': price must be positive", product.id);
            continue;
        }
        if product.images.is_empty() {
            warn!("skipping '{}': at least one image is required", product.id);
            continue;
        }
        if let Some(discount) = product.discount_price {
            if discount >= product.price || discount <= 0.0 || !discount.is_finite() {
                warn!(
                    "dropping discount on '{}': must be positive and below the base price",
                    product.id
                );
                product.discount_price = None;
            }
        }
        kept.push(product);
    }

    let report = ImportReport {
        imported: kept.len(),
        skipped: total - kept.len(),
    };
    (Catalog::new(kept), report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, price: f64) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: format!("Product {id}"),
            categories: vec!["men".to_string()],
            price,
            discount_price: None,
            images: vec![format!("{id}-main")],
            sizes: Vec::new(),
            colors: Vec::new(),
            tags: Vec::new(),
            is_featured: false,
            is_flash_sale: false,
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("catalog.json"), "{not json").unwrap();
        let store = CatalogStore::open(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path());
        let catalog = Catalog::new(vec![record("p1", 30.0), record("p2", 45.5)]);
        store.save(&catalog).unwrap();
        assert_eq!(store.load(), catalog);
    }

    #[test]
    fn test_import_skips_invalid_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut free = record("free", 0.0);
        free.price = 0.0;
        let mut blank = record("blank", 20.0);
        blank.images.clear();
        let good = record("good", 20.0);

        let source = dir.path().join("drop.json");
        let raw = serde_json::to_string(&vec![free, blank, good]).unwrap();
        std::fs::write(&source, raw).unwrap();

        let store = CatalogStore::open(dir.path().join("store"));
        let report = store.import(&source).unwrap();
        assert_eq!(report, ImportReport { imported: 1, skipped: 2 });
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_import_drops_bad_discounts() {
        let dir = tempfile::tempdir().unwrap();
        let mut inflated = record("p1", 50.0);
        inflated.discount_price = Some(60.0);

        let source = dir.path().join("drop.json");
        std::fs::write(&source, serde_json::to_string(&vec![inflated]).unwrap()).unwrap();

        let store = CatalogStore::open(dir.path().join("store"));
        store.import(&source).unwrap();
        let catalog = store.load();
        assert_eq!(catalog.products[0].discount_price, None);
        assert_eq!(catalog.products[0].effective_price(), 50.0);
    }

    #[test]
    fn test_clear_reports_presence() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path());
        assert!(!store.clear().unwrap());
        store.save(&Catalog::default()).unwrap();
        assert!(store.clear().unwrap());
    }
}
