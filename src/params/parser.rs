//! Decode and encode query strings into [`QueryState`].

use url::form_urlencoded;

use crate::catalog::types::{PriceRange, QueryState, SortKey, TagFilter};

/// Recognized query keys. Anything else is ignored explicitly.
///
/// `category`, `size`, and `color` are repeatable; the rest are
/// single-valued with last-one-wins semantics.
const KEY_CATEGORY: &str = "category";
const KEY_SIZE: &str = "size";
const KEY_COLOR: &str = "color";
const KEY_PRICE: &str = "price";
const KEY_SEARCH: &str = "q";
const KEY_TAG: &str = "tag";
const KEY_SORT: &str = "sort";
const KEY_PAGE: &str = "page";

/// Parse a query string into a query state.
///
/// Never fails: malformed price segments, bad page numbers, and unknown
/// sort values all fall back to their unset/default forms.
pub fn parse(query: &str) -> QueryState {
    let query = query.trim().trim_start_matches('?');
    let mut state = QueryState::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let value = value.trim();
        match key.as_ref() {
            KEY_CATEGORY => push_selection(&mut state.categories, value),
            KEY_SIZE => push_selection(&mut state.sizes, value),
            KEY_COLOR => push_selection(&mut state.colors, value),
            KEY_PRICE => state.price = parse_price(value),
            KEY_SEARCH => {
                state.search = (!value.is_empty()).then(|| value.to_string());
            }
            KEY_TAG => {
                state.tag = (!value.is_empty()).then(|| TagFilter::from_param(value));
            }
            KEY_SORT => state.sort = SortKey::from_param(value),
            KEY_PAGE => {
                state.page = value.parse().ok().filter(|p| *p >= 1).unwrap_or(1);
            }
            _ => {}
        }
    }

    state
}

/// Encode a query state back into a query string.
///
/// Emits only non-default state, in a canonical key order, so that
/// `parse(encode(s)) == s` for any state produced by `parse`.
pub fn encode(state: &QueryState) -> String {
    let mut ser = form_urlencoded::Serializer::new(String::new());

    for value in &state.categories {
        ser.append_pair(KEY_CATEGORY, value);
    }
    for value in &state.sizes {
        ser.append_pair(KEY_SIZE, value);
    }
    for value in &state.colors {
        ser.append_pair(KEY_COLOR, value);
    }
    if state.price.is_set() {
        ser.append_pair(KEY_PRICE, &encode_price(&state.price));
    }
    if let Some(ref term) = state.search {
        ser.append_pair(KEY_SEARCH, term);
    }
    if let Some(ref tag) = state.tag {
        ser.append_pair(KEY_TAG, tag.as_param());
    }
    if state.sort != SortKey::default() {
        ser.append_pair(KEY_SORT, state.sort.as_param());
    }
    if state.page > 1 {
        ser.append_pair(KEY_PAGE, &state.page.to_string());
    }

    ser.finish()
}

/// Parse the `"<min>-<max>"` price format. An empty, zero, or
/// unparseable side means "unset" for that side.
pub(crate) fn parse_price(raw: &str) -> PriceRange {
    let (lo, hi) = raw.split_once('-').unwrap_or((raw, ""));
    PriceRange {
        min: parse_bound(lo),
        max: parse_bound(hi),
    }
}

fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| *v > 0.0 && v.is_finite())
}

fn encode_price(range: &PriceRange) -> String {
    let min = range
        .min_bound()
        .map(crate::browse::chips::fmt_amount)
        .unwrap_or_default();
    let max = range
        .max_bound()
        .map(crate::browse::chips::fmt_amount)
        .unwrap_or_default();
    format!("{min}-{max}")
}

fn push_selection(values: &mut Vec<String>, value: &str) {
    if value.is_empty() {
        return;
    }
    if !values.iter().any(|v| v.eq_ignore_ascii_case(value)) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeatable_keys() {
        let state = parse("category=men&category=sale&size=M&color=olive");
        assert_eq!(state.categories, vec!["men", "sale"]);
        assert_eq!(state.sizes, vec!["M"]);
        assert_eq!(state.colors, vec!["olive"]);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_parse_full_query() {
        let state = parse("?category=women&price=25-120&q=linen%20dress&tag=flash-sale&sort=price-asc&page=3");
        assert_eq!(state.categories, vec!["women"]);
        assert_eq!(state.price.min_bound(), Some(25.0));
        assert_eq!(state.price.max_bound(), Some(120.0));
        assert_eq!(state.search.as_deref(), Some("linen dress"));
        assert_eq!(state.tag, Some(TagFilter::FlashSale));
        assert_eq!(state.sort, SortKey::PriceAsc);
        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_price_sides_are_independently_optional() {
        assert_eq!(parse("price=25-").price.max_bound(), None);
        assert_eq!(parse("price=25-").price.min_bound(), Some(25.0));
        assert_eq!(parse("price=-80").price.min_bound(), None);
        assert_eq!(parse("price=-80").price.max_bound(), Some(80.0));
        // No separator constrains only the lower end
        assert_eq!(parse("price=25").price.min_bound(), Some(25.0));
    }

    #[test]
    fn test_zero_price_means_unset() {
        let state = parse("price=0-0");
        assert!(!state.price.is_set());
    }

    #[test]
    fn test_malformed_values_degrade_to_unset() {
        assert!(!parse("price=cheap-expensive").price.is_set());
        assert_eq!(parse("price=10-abc").price.min_bound(), Some(10.0));
        assert_eq!(parse("price=10-abc").price.max_bound(), None);
        assert_eq!(parse("page=zero").page, 1);
        assert_eq!(parse("page=0").page, 1);
        assert_eq!(parse("sort=rating").sort, SortKey::Newest);
    }

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let state = parse("category=men&utm_source=mail&brand=acme");
        assert_eq!(state.categories, vec!["men"]);
        assert_eq!(state, {
            let mut expected = QueryState::default();
            expected.categories = vec!["men".to_string()];
            expected
        });
    }

    #[test]
    fn test_duplicate_selections_collapse() {
        let state = parse("category=men&category=Men");
        assert_eq!(state.categories, vec!["men"]);
    }

    #[test]
    fn test_unrecognized_tag_is_carried() {
        let state = parse("tag=summer");
        assert_eq!(state.tag, Some(TagFilter::Unrecognized("summer".to_string())));
    }

    #[test]
    fn test_encode_skips_defaults() {
        assert_eq!(encode(&QueryState::default()), "");

        let mut state = QueryState::default();
        state.categories = vec!["men".to_string()];
        state.page = 1;
        assert_eq!(encode(&state), "category=men");
    }

    #[test]
    fn test_round_trip() {
        let raw = "category=men&category=sale&size=M&color=navy&price=25-120&q=field+jacket&tag=featured&sort=price-desc&page=2";
        let state = parse(raw);
        let encoded = encode(&state);
        assert_eq!(parse(&encoded), state);
        assert_eq!(encoded, raw);
    }
}
