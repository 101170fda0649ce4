//! Filter operations over the product catalog.
//!
//! A product is retained iff every active criterion passes; empty criteria
//! always pass. Malformed or unset inputs degrade to "no constraint"
//! rather than failing, and an empty result set is a legitimate outcome,
//! not an error.

use crate::catalog::types::{ProductRecord, QueryState, TagFilter};

impl super::Catalog {
    /// Filter products by the current query state.
    pub fn filter(&self, state: &QueryState) -> Vec<&ProductRecord> {
        let mut results = Vec::new();

        for product in &self.products {
            // Category: selection intersects the product's category set
            if !state.categories.is_empty()
                && !product
                    .categories
                    .iter()
                    .any(|c| contains_ignore_case(&state.categories, c))
            {
                continue;
            }

            // Size: exact label intersection
            if !state.sizes.is_empty()
                && !product.sizes.iter().any(|s| state.sizes.contains(s))
            {
                continue;
            }

            // Color: name intersection, separator punctuation split off
            if !state.colors.is_empty()
                && !product
                    .colors
                    .iter()
                    .any(|c| state.colors.iter().any(|sel| color_matches(&c.name, sel)))
            {
                continue;
            }

            // Search: case-insensitive substring of the display name
            if let Some(ref term) = state.search {
                if !product
                    .name
                    .to_lowercase()
                    .contains(&term.to_lowercase())
                {
                    continue;
                }
            }

            // Price: bounds on the effective price, zero meaning unset
            let effective = product.effective_price();
            if let Some(min) = state.price.min_bound() {
                if effective < min {
                    continue;
                }
            }
            if let Some(max) = state.price.max_bound() {
                if effective > max {
                    continue;
                }
            }

            // Tag: recognized values map onto product flags
            if !matches_tag(product, state.tag.as_ref()) {
                continue;
            }

            results.push(product);
        }

        results
    }
}

fn contains_ignore_case(selected: &[String], value: &str) -> bool {
    selected.iter().any(|s| s.eq_ignore_ascii_case(value))
}

/// A stored color name matches a selection if the whole name matches
/// case-insensitively, or if any punctuation-separated segment of the
/// stored name does (so "Navy/White" matches "white", "Off-White" matches
/// "white").
pub(crate) fn color_matches(stored: &str, selected: &str) -> bool {
    if stored.eq_ignore_ascii_case(selected) {
        return true;
    }
    stored
        .split(|c: char| !c.is_alphanumeric())
        .filter(|seg| !seg.is_empty())
        .any(|seg| seg.eq_ignore_ascii_case(selected))
}

fn matches_tag(product: &ProductRecord, tag: Option<&TagFilter>) -> bool {
    match tag {
        None => true,
        Some(TagFilter::FlashSale) => product.is_flash_sale,
        Some(TagFilter::Featured) => product.is_featured,
        // Unrecognized tag values match no product; see TagFilter docs.
        Some(TagFilter::Unrecognized(_)) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{Catalog, ColorEntry, PriceRange, QueryState};
    use chrono::{TimeZone, Utc};

    fn product(id: &str, name: &str, category: &str, price: f64) -> ProductRecord {
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
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn build_test_catalog() -> Catalog {
        let mut jacket = product("p1", "Field Jacket", "men", 120.0);
        jacket.sizes = vec!["M".to_string(), "L".to_string()];
        jacket.colors = vec![ColorEntry {
            name: "Olive".to_string(),
            value: "#556b2f".to_string(),
        }];
        jacket.is_featured = true;

        let mut dress = product("p2", "Linen Dress", "women", 89.0);
        dress.discount_price = Some(59.0);
        dress.sizes = vec!["S".to_string(), "M".to_string()];
        dress.colors = vec![ColorEntry {
            name: "Navy/White".to_string(),
            value: "#000080".to_string(),
        }];
        dress.is_flash_sale = true;

        let mut tee = product("p3", "Logo Tee", "men", 25.0);
        tee.categories.push("sale".to_string());
        tee.sizes = vec!["S".to_string(), "M".to_string(), "L".to_string()];
        tee.colors = vec![ColorEntry {
            name: "Off-White".to_string(),
            value: "#faf0e6".to_string(),
        }];

        Catalog::new(vec![jacket, dress, tee])
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let catalog = build_test_catalog();
        let results = catalog.filter(&QueryState::default());
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_category_filter_is_case_insensitive() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        state.categories = vec!["MEN".to_string()];
        let results = catalog.filter(&state);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|p| p.categories.iter().any(|c| c == "men")));
    }

    #[test]
    fn test_categories_are_disjunctive_within_type() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        state.categories = vec!["women".to_string(), "sale".to_string()];
        let results = catalog.filter(&state);
        assert_eq!(results.len(), 2); // dress + tee
    }

    #[test]
    fn test_size_filter() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        state.sizes = vec!["S".to_string()];
        let results = catalog.filter(&state);
        assert_eq!(results.len(), 2); // dress + tee
    }

    #[test]
    fn test_color_filter_splits_separator_punctuation() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        state.colors = vec!["white".to_string()];
        let results = catalog.filter(&state);
        // "Navy/White" and "Off-White" both match "white"
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_color_matches_whole_name() {
        assert!(color_matches("Olive", "olive"));
        assert!(color_matches("Off-White", "off-white"));
        assert!(color_matches("Navy/White", "navy"));
        assert!(!color_matches("Olive", "white"));
    }

    #[test]
    fn test_search_is_substring_case_insensitive() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        state.search = Some("JACKET".to_string());
        let results = catalog.filter(&state);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "p1");
    }

    #[test]
    fn test_price_bounds_use_effective_price() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        // The dress is 89.0 with a 59.0 discount; an 80.0 cap keeps it
        state.price = PriceRange {
            min: None,
            max: Some(80.0),
        };
        let results = catalog.filter(&state);
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3"]);
    }

    #[test]
    fn test_zero_price_bound_is_unset() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        state.price = PriceRange {
            min: Some(0.0),
            max: Some(0.0),
        };
        assert_eq!(catalog.filter(&state).len(), 3);
    }

    #[test]
    fn test_tag_filter_maps_to_flags() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        state.tag = Some(TagFilter::FlashSale);
        let results = catalog.filter(&state);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "p2");

        state.tag = Some(TagFilter::Featured);
        let results = catalog.filter(&state);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "p1");
    }

    #[test]
    fn test_unrecognized_tag_matches_nothing() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        state.tag = Some(TagFilter::Unrecognized("summer".to_string()));
        assert!(catalog.filter(&state).is_empty());
    }

    #[test]
    fn test_filters_compose_conjunctively() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        state.categories = vec!["men".to_string()];
        state.sizes = vec!["S".to_string()];
        let results = catalog.filter(&state);
        // Only the tee is both men's and available in S
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "p3");

        // Every retained product satisfies each predicate independently
        for p in &results {
            assert!(p.categories.iter().any(|c| c.eq_ignore_ascii_case("men")));
            assert!(p.sizes.contains(&"S".to_string()));
        }
    }

    #[test]
    fn test_filter_is_pure() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        state.categories = vec!["men".to_string()];
        let first = catalog.filter(&state);
        let second = catalog.filter(&state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let catalog = build_test_catalog();
        let mut state = QueryState::default();
        state.search = Some("no such product".to_string());
        assert!(catalog.filter(&state).is_empty());
    }
}
