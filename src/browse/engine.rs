//! Compose filtering, sorting, and pagination into a result page.

use std::cmp::Ordering;

use crate::browse::chips;
use crate::catalog::types::{Catalog, ProductRecord, QueryState, ResultPage, SortKey, PAGE_SIZE};

/// Execute a query against a catalog.
///
/// Control flow per state change: filter → sort → paginate → chips. The
/// page number is taken as-is; the caller resets it to 1 whenever any
/// other input changes, and an out-of-range page yields an empty (still
/// displayable) slice rather than an error.
pub fn execute(catalog: &Catalog, state: &QueryState) -> ResultPage {
    let filtered = catalog.filter(state);
    let sorted = sort_products(filtered, state.sort);
    let total_count = sorted.len();
    let (items, total_pages) = paginate(&sorted, state.page, PAGE_SIZE);

    ResultPage {
        items: items.into_iter().cloned().collect(),
        total_count,
        total_pages,
        page: state.page,
        filters: chips::active_filters(state),
    }
}

/// Stable sort by the requested key. Returns a new ordering; ties retain
/// their relative order from the input so pagination stays deterministic.
pub fn sort_products(mut products: Vec<&ProductRecord>, key: SortKey) -> Vec<&ProductRecord> {
    match key {
        SortKey::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::PriceAsc => products.sort_by(|a, b| cmp_price(a, b)),
        SortKey::PriceDesc => products.sort_by(|a, b| cmp_price(b, a)),
    }
    products
}

fn cmp_price(a: &ProductRecord, b: &ProductRecord) -> Ordering {
    a.effective_price()
        .partial_cmp(&b.effective_price())
        .unwrap_or(Ordering::Equal)
}

/// Slice out one 1-based page and report the page count.
///
/// `total_pages` is `ceil(len / page_size)`; pages outside `[1, total]`
/// produce an empty slice.
pub fn paginate<'a>(
    products: &[&'a ProductRecord],
    page: usize,
    page_size: usize,
) -> (Vec<&'a ProductRecord>, usize) {
    if page_size == 0 {
        return (Vec::new(), 0);
    }
    let total_pages = products.len().div_ceil(page_size);
    if page == 0 {
        return (Vec::new(), total_pages);
    }

    let start = (page - 1).saturating_mul(page_size);
    if start >= products.len() {
        return (Vec::new(), total_pages);
    }
    let end = (start + page_size).min(products.len());
    (products[start..end].to_vec(), total_pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::PriceRange;
    use chrono::{TimeZone, Utc};

    fn product(id: &str, name: &str, category: &str, price: f64, day: u32) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: name.to_string(),
            categories: vec![category.to_string()],
            price,
            discount_price: None,
            images: vec![format!("{id}-main")],
            sizes: Vec::new(),
            colors: Vec::new(),
            tags: Vec::new(),
            is_featured: false,
            is_flash_sale: false,
            created_at: Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap(),
        }
    }

    fn build_test_catalog(count: usize) -> Catalog {
        let products = (0..count)
            .map(|i| {
                product(
                    &format!("p{i}"),
                    &format!("Product {i}"),
                    if i % 2 == 0 { "men" } else { "women" },
                    10.0 + i as f64,
                    1 + (i % 28) as u32,
                )
            })
            .collect();
        Catalog::new(products)
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let a = product("p1", "Old", "men", 10.0, 1);
        let b = product("p2", "New", "men", 20.0, 20);
        let catalog = Catalog::new(vec![a, b]);

        let page = execute(&catalog, &QueryState::default());
        assert_eq!(page.items[0].id, "p2");
        assert_eq!(page.items[1].id, "p1");
    }

    #[test]
    fn test_price_sort_uses_effective_price() {
        let cheap = product("p1", "Cheap", "men", 10.0, 1);
        let mut discounted = product("p2", "Discounted", "men", 100.0, 2);
        discounted.discount_price = Some(5.0);
        let catalog = Catalog::new(vec![cheap, discounted]);

        let mut state = QueryState::default();
        state.sort = crate::catalog::SortKey::PriceAsc;
        let page = execute(&catalog, &state);
        assert_eq!(page.items[0].id, "p2"); // 5.0 effective
        assert_eq!(page.items[1].id, "p1");
    }

    #[test]
    fn test_sort_is_stable_on_price_ties() {
        let a = product("p1", "A", "men", 30.0, 1);
        let b = product("p2", "B", "men", 30.0, 1);
        let c = product("p3", "C", "men", 30.0, 1);
        let catalog = Catalog::new(vec![a, b, c]);

        let refs: Vec<&ProductRecord> = catalog.products.iter().collect();
        let sorted = sort_products(refs.clone(), SortKey::PriceAsc);
        let ids: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);

        // Equal timestamps under Newest keep input order too
        let sorted = sort_products(refs, SortKey::Newest);
        let ids: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let catalog = build_test_catalog(5);
        let refs: Vec<&ProductRecord> = catalog.products.iter().collect();
        let before: Vec<&str> = refs.iter().map(|p| p.id.as_str()).collect();
        let _sorted = sort_products(refs.clone(), SortKey::PriceDesc);
        let after: Vec<&str> = refs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_paginate_partition_law() {
        let catalog = build_test_catalog(21);
        let refs: Vec<&ProductRecord> = catalog.products.iter().collect();

        let (_, total_pages) = paginate(&refs, 1, PAGE_SIZE);
        assert_eq!(total_pages, 3); // ceil(21 / 9)

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            let (items, _) = paginate(&refs, page, PAGE_SIZE);
            seen.extend(items.iter().map(|p| p.id.clone()));
        }
        let expected: Vec<String> = refs.iter().map(|p| p.id.clone()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_out_of_range_page_is_empty_not_error() {
        let catalog = build_test_catalog(4);
        let refs: Vec<&ProductRecord> = catalog.products.iter().collect();
        let (items, total_pages) = paginate(&refs, 9, PAGE_SIZE);
        assert!(items.is_empty());
        assert_eq!(total_pages, 1);

        let (items, _) = paginate(&refs, 0, PAGE_SIZE);
        assert!(items.is_empty());
    }

    #[test]
    fn test_execute_is_referentially_transparent() {
        let catalog = build_test_catalog(30);
        let mut state = QueryState::default();
        state.categories = vec!["men".to_string()];
        state.sort = SortKey::PriceDesc;
        state.page = 2;

        let first = execute(&catalog, &state);
        let second = execute(&catalog, &state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_sort_paginate_scenario() {
        // Mirror of the reference walkthrough: two products, filter by
        // category, sort by price descending, then a one-per-page slice.
        let a = product("a", "A", "men", 1000.0, 1);
        let b = product("b", "B", "women", 2000.0, 2);
        let catalog = Catalog::new(vec![a, b]);

        let mut state = QueryState::default();
        state.categories = vec!["men".to_string()];
        let filtered = catalog.filter(&state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");

        let all: Vec<&ProductRecord> = catalog.products.iter().collect();
        let sorted = sort_products(all, SortKey::PriceDesc);
        let ids: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let (items, total_pages) = paginate(&sorted, 2, 1);
        assert_eq!(total_pages, 2);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "a");
    }

    #[test]
    fn test_execute_reports_counts_and_chips() {
        let catalog = build_test_catalog(12);
        let mut state = QueryState::default();
        state.categories = vec!["men".to_string()];
        state.price = PriceRange {
            min: Some(11.0),
            max: None,
        };

        let page = execute(&catalog, &state);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.filters.len(), 2); // one category chip + price chip
        assert!(!page.has_prev());
        assert!(!page.has_next());
    }
}
