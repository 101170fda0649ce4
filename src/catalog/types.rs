//! Core catalog types: product records, query state, and result pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of products shown per page.
pub const PAGE_SIZE: usize = 9;

/// A named color with its display value (e.g. a hex code).
///
/// Only `name` participates in filtering; `value` is for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub name: String,
    pub value: String,
}

/// Immutable snapshot of a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    /// A product may belong to several categories.
    pub categories: Vec<String>,
    pub price: f64,
    /// When present, strictly less than `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    /// Ordered image references; never empty for a valid record.
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<ColorEntry>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_flash_sale: bool,
    pub created_at: DateTime<Utc>,
}

impl ProductRecord {
    /// Discount price if present, else base price. Used for all price
    /// comparisons and sorting.
    pub fn effective_price(&self) -> f64 {
        self.discount_price.unwrap_or(self.price)
    }
}

/// Sort order for catalog results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// Parse the `sort` query parameter. Unrecognized values fall back to
    /// the default order.
    pub fn from_param(s: &str) -> Self {
        match s {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::Newest,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
        }
    }
}

/// Optional price bounds on the effective price.
///
/// A bound of exactly zero means "not set", matching the query-string
/// convention where `price=0-50` constrains only the upper end. The typed
/// accessors below are the single place that sentinel is interpreted;
/// programmatic callers should prefer `None` to express "no bound".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    /// Lower bound, with zero and non-finite values treated as unset.
    pub fn min_bound(&self) -> Option<f64> {
        self.min.filter(|v| *v > 0.0 && v.is_finite())
    }

    /// Upper bound, with zero and non-finite values treated as unset.
    pub fn max_bound(&self) -> Option<f64> {
        self.max.filter(|v| *v > 0.0 && v.is_finite())
    }

    /// Whether either bound is effective.
    pub fn is_set(&self) -> bool {
        self.min_bound().is_some() || self.max_bound().is_some()
    }
}

/// The recognized `tag` filter values.
///
/// The recognized set is closed: `flash-sale` and `featured` map onto the
/// corresponding product flags. Any other value is carried as
/// `Unrecognized` and matches no product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    FlashSale,
    Featured,
    Unrecognized(String),
}

impl TagFilter {
    pub fn from_param(s: &str) -> Self {
        match s {
            "flash-sale" => Self::FlashSale,
            "featured" => Self::Featured,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_param(&self) -> &str {
        match self {
            Self::FlashSale => "flash-sale",
            Self::Featured => "featured",
            Self::Unrecognized(s) => s,
        }
    }
}

/// The current filter/sort/page selection.
///
/// Owned and mutated by the presentation layer; the engine only reads it.
/// Filters compose conjunctively across types and disjunctively within a
/// type. All mutators reset the page to 1; pagination never survives a
/// change to any other input.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub categories: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub price: PriceRange,
    pub search: Option<String>,
    pub tag: Option<TagFilter>,
    pub sort: SortKey,
    /// 1-based page number.
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            price: PriceRange::default(),
            search: None,
            tag: None,
            sort: SortKey::default(),
            page: 1,
        }
    }
}

impl QueryState {
    /// Whether any filter input is active (sort and page are not filters).
    pub fn has_filters(&self) -> bool {
        !self.categories.is_empty()
            || !self.sizes.is_empty()
            || !self.colors.is_empty()
            || self.price.is_set()
            || self.search.is_some()
            || self.tag.is_some()
    }

    /// Add the value if absent, remove it if present. Resets the page.
    pub fn toggle_category(&mut self, value: &str) {
        toggle(&mut self.categories, value);
        self.page = 1;
    }

    /// Add the value if absent, remove it if present. Resets the page.
    pub fn toggle_size(&mut self, value: &str) {
        toggle(&mut self.sizes, value);
        self.page = 1;
    }

    /// Add the value if absent, remove it if present. Resets the page.
    pub fn toggle_color(&mut self, value: &str) {
        toggle(&mut self.colors, value);
        self.page = 1;
    }

    pub fn set_price(&mut self, price: PriceRange) {
        self.price = price;
        self.page = 1;
    }

    /// Set or clear the search term. Blank input clears. Resets the page.
    pub fn set_search(&mut self, term: Option<&str>) {
        self.search = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);
        self.page = 1;
    }

    pub fn set_tag(&mut self, tag: Option<TagFilter>) {
        self.tag = tag;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Drop every filter input, keeping the sort order. Resets the page.
    pub fn clear_filters(&mut self) {
        self.categories.clear();
        self.sizes.clear();
        self.colors.clear();
        self.price = PriceRange::default();
        self.search = None;
        self.tag = None;
        self.page = 1;
    }
}

fn toggle(values: &mut Vec<String>, value: &str) {
    if let Some(pos) = values.iter().position(|v| v.eq_ignore_ascii_case(value)) {
        values.remove(pos);
    } else {
        values.push(value.to_string());
    }
}

/// Which facet an active-filter chip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Category,
    Size,
    Color,
    Price,
}

/// One removable active-filter chip: the facet, the raw value carried in
/// the query state, and a human-readable label for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveFilter {
    pub kind: FilterKind,
    pub value: String,
    pub label: String,
}

/// One rendered page of results. Derived, never cached: recomputed from
/// the catalog and query state on every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    pub items: Vec<ProductRecord>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub filters: Vec<ActiveFilter>,
}

impl ResultPage {
    /// Whether a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// The full product set for a storefront.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<ProductRecord>,
}

impl Catalog {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by its identifier.
    pub fn find(&self, id: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct category labels with product counts, most common first.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for product in &self.products {
            for category in &product.categories {
                match counts
                    .iter_mut()
                    .find(|(c, _)| c.eq_ignore_ascii_case(category))
                {
                    Some((_, n)) => *n += 1,
                    None => counts.push((category.clone(), 1)),
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}
