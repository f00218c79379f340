//! Catalog browse state: one loaded product list plus the filter, sort and
//! pagination state a storefront session mutates.
//!
//! Two paging styles coexist. "Voir plus" accumulates pages 1..=N into one
//! growing grid; jumping to a page shows that page alone. Any filter or
//! sort change resets to page 1 in accumulate mode.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::filter::{filtered_indices, full_price_range, FilterState};
use crate::pagination::{clamp_page, has_more, max_page, page_slice, DEFAULT_PER_PAGE};
use crate::product::Product;
use crate::sort::{compare, SortOrder};

/// Where a loaded catalog came from. Fallback is an operator-visible
/// degraded mode, never a silent substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Products fetched from the live Storefront API.
    Live,
    /// The built-in demo catalog, with the reason it was substituted.
    Fallback(FallbackReason),
}

impl CatalogSource {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback(_) => "fallback",
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    #[must_use]
    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Live => None,
            Self::Fallback(reason) => Some(reason),
        }
    }
}

/// Why the fallback catalog was served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No shop domain or token configured.
    NotConfigured,
    /// The live shop answered with zero products.
    EmptyCatalog,
    /// The live fetch failed; the message describes the upstream error.
    Upstream(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => f.write_str("storefront not configured"),
            Self::EmptyCatalog => f.write_str("live catalog is empty"),
            Self::Upstream(message) => write!(f, "upstream fetch failed: {message}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    /// Pages 1..=current shown together ("Voir plus").
    Accumulate,
    /// Only the current page shown (pager navigation).
    Single,
}

/// Browse state over one loaded catalog.
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    products: Vec<Product>,
    source: CatalogSource,
    loaded_at: DateTime<Utc>,
    filter: FilterState,
    sort: SortOrder,
    per_page: usize,
    current_page: usize,
    view: ViewMode,
    filtered: Vec<usize>,
}

impl CatalogBrowser {
    /// Builds browse state over `products`. `loaded_at` anchors the
    /// recency-based tag rules for the lifetime of this catalog load.
    #[must_use]
    pub fn new(products: Vec<Product>, source: CatalogSource, loaded_at: DateTime<Utc>) -> Self {
        let mut browser = Self {
            products,
            source,
            loaded_at,
            filter: FilterState::default(),
            sort: SortOrder::Featured,
            per_page: DEFAULT_PER_PAGE,
            current_page: 1,
            view: ViewMode::Accumulate,
            filtered: Vec::new(),
        };
        browser.recompute();
        browser
    }

    /// Re-runs the filter pipeline and sort, back on page 1.
    fn recompute(&mut self) {
        self.filtered = filtered_indices(&self.products, &self.filter, self.loaded_at);
        if self.sort != SortOrder::Featured {
            let products = &self.products;
            let order = self.sort;
            self.filtered
                .sort_by(|&a, &b| compare(&products[a], &products[b], order));
        }
        self.current_page = 1;
        self.view = ViewMode::Accumulate;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.search_query = query.into();
        self.recompute();
    }

    /// Adds the tag if absent, removes it if present.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.filter.search_tags.iter().position(|t| t == tag) {
            self.filter.search_tags.remove(pos);
        } else {
            self.filter.search_tags.push(tag.to_string());
        }
        self.recompute();
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.filter.search_tags = tags;
        self.recompute();
    }

    pub fn set_price_range(&mut self, min: Decimal, max: Decimal) {
        self.filter.price_range = (min, max);
        self.recompute();
    }

    pub fn reset_price_range(&mut self) {
        self.filter.price_range = full_price_range();
        self.recompute();
    }

    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self.filter.categories.iter().position(|c| c == category) {
            self.filter.categories.remove(pos);
        } else {
            self.filter.categories.push(category.to_string());
        }
        self.recompute();
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.filter.categories = categories;
        self.recompute();
    }

    pub fn set_in_stock_only(&mut self, in_stock_only: bool) {
        self.filter.in_stock_only = in_stock_only;
        self.recompute();
    }

    pub fn set_sort(&mut self, order: SortOrder) {
        self.sort = order;
        self.recompute();
    }

    /// Back to a fully neutral filter.
    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        self.recompute();
    }

    /// Extends the grid by one page. Returns false when the last page was
    /// already showing.
    pub fn load_more(&mut self) -> bool {
        self.view = ViewMode::Accumulate;
        if has_more(self.current_page, self.filtered.len(), self.per_page) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Jumps to a single page, clamped into range.
    pub fn go_to_page(&mut self, page: usize) {
        self.view = ViewMode::Single;
        self.current_page = clamp_page(page, self.filtered.len(), self.per_page);
    }

    /// Changes the page size and restarts from page 1.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.current_page = 1;
        self.view = ViewMode::Accumulate;
    }

    /// The products currently visible in the grid.
    #[must_use]
    pub fn displayed(&self) -> Vec<&Product> {
        let visible = match self.view {
            ViewMode::Accumulate => {
                let end = (self.current_page * self.per_page).min(self.filtered.len());
                &self.filtered[..end]
            }
            ViewMode::Single => page_slice(&self.filtered, self.current_page, self.per_page),
        };
        visible.iter().map(|&i| &self.products[i]).collect()
    }

    /// The whole filtered list in sorted order, ignoring pagination.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Product> {
        self.filtered.iter().map(|&i| &self.products[i]).collect()
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    #[must_use]
    pub fn total_filtered(&self) -> usize {
        self.filtered.len()
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        max_page(self.filtered.len(), self.per_page)
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        has_more(self.current_page, self.filtered.len(), self.per_page)
    }

    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
#[path = "browse_test.rs"]
mod tests;
