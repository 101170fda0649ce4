//! Active-filter chip derivation and removal.
//!
//! Each individually-selected category/size/color value becomes one chip,
//! plus at most one chip for the price range. A chip carries enough to
//! re-derive a query state with that single value removed, leaving every
//! other selection untouched.

use crate::catalog::types::{ActiveFilter, FilterKind, PriceRange, QueryState};

/// Derive the chip list for the current state.
pub fn active_filters(state: &QueryState) -> Vec<ActiveFilter> {
    let mut filters = Vec::new();

    for value in &state.categories {
        filters.push(ActiveFilter {
            kind: FilterKind::Category,
            value: value.clone(),
            label: value.clone(),
        });
    }
    for value in &state.sizes {
        filters.push(ActiveFilter {
            kind: FilterKind::Size,
            value: value.clone(),
            label: format!("Size {value}"),
        });
    }
    for value in &state.colors {
        filters.push(ActiveFilter {
            kind: FilterKind::Color,
            value: value.clone(),
            label: value.clone(),
        });
    }
    if state.price.is_set() {
        filters.push(ActiveFilter {
            kind: FilterKind::Price,
            value: price_value(&state.price),
            label: price_label(&state.price),
        });
    }

    filters
}

/// Return a state with exactly the given chip removed. The price chip
/// clears the whole range. The page resets to 1.
pub fn remove_filter(state: &QueryState, filter: &ActiveFilter) -> QueryState {
    let mut next = state.clone();
    match filter.kind {
        FilterKind::Category => {
            next.categories
                .retain(|v| !v.eq_ignore_ascii_case(&filter.value));
        }
        FilterKind::Size => {
            next.sizes.retain(|v| v != &filter.value);
        }
        FilterKind::Color => {
            next.colors
                .retain(|v| !v.eq_ignore_ascii_case(&filter.value));
        }
        FilterKind::Price => {
            next.price = PriceRange::default();
        }
    }
    next.page = 1;
    next
}

fn price_value(range: &PriceRange) -> String {
    let min = range.min_bound().map(fmt_amount).unwrap_or_default();
    let max = range.max_bound().map(fmt_amount).unwrap_or_default();
    format!("{min}-{max}")
}

fn price_label(range: &PriceRange) -> String {
    match (range.min_bound(), range.max_bound()) {
        (Some(min), Some(max)) => format!("${} to ${}", fmt_amount(min), fmt_amount(max)),
        (Some(min), None) => format!("Over ${}", fmt_amount(min)),
        (None, Some(max)) => format!("Under ${}", fmt_amount(max)),
        (None, None) => String::new(),
    }
}

/// Render an amount without a trailing ".00" for whole values.
pub(crate) fn fmt_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
