//! Page math for the catalog grid.
//!
//! Page numbers are 1-based everywhere. Out-of-range requests clamp instead
//! of erroring, so shrinking a filtered list never strands the UI on an
//! empty page.

/// Products shown per page unless the caller configures otherwise.
pub const DEFAULT_PER_PAGE: usize = 9;

/// Highest valid page for `total` items, never less than 1. An empty list
/// still has exactly one (empty) page.
#[must_use]
pub fn max_page(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page).max(1)
}

/// Clamps a requested page into `1..=max_page`.
#[must_use]
pub fn clamp_page(requested: usize, total: usize, per_page: usize) -> usize {
    requested.clamp(1, max_page(total, per_page))
}

/// True when pages after `page` exist.
#[must_use]
pub fn has_more(page: usize, total: usize, per_page: usize) -> bool {
    page < max_page(total, per_page)
}

/// The slice of `items` visible on `page`, after clamping.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if per_page == 0 || items.is_empty() {
        return &items[..0];
    }
    let page = clamp_page(page, items.len(), per_page);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    &items[start..end]
}
