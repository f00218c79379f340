//! Catalog filtering: five sequential narrowing passes over a product list.
//!
//! Pass order is fixed (text, tags, price, category, stock) and each pass
//! only runs when its criterion is active, so a neutral `FilterState` is a
//! no-op that keeps catalog order.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::product::{Product, Variant};
use crate::query::{matches_query, query_variants};

/// Tags with date or price semantics instead of literal membership.
const TAG_NEW_ARRIVALS: &str = "Nouveautés";
const TAG_PROMOTIONS: &str = "Promotions";
const TAG_XIAOMI: &str = "Xiaomi";

/// Days a product stays in the "Nouveautés" window after creation.
const NEW_ARRIVAL_WINDOW_DAYS: i64 = 30;

/// The widest selectable price range. When the active range equals this
/// sentinel the price pass is skipped entirely, so products with
/// unparseable prices survive an untouched slider.
#[must_use]
pub fn full_price_range() -> (Decimal, Decimal) {
    (Decimal::ZERO, Decimal::from(20_000))
}

/// Active filter criteria. Defaults are neutral on every axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub search_tags: Vec<String>,
    pub price_range: (Decimal, Decimal),
    pub categories: Vec<String>,
    pub in_stock_only: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            search_tags: Vec::new(),
            price_range: full_price_range(),
            categories: Vec::new(),
            in_stock_only: false,
        }
    }
}

impl FilterState {
    /// True when no pass would run.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.search_query.trim().is_empty()
            && self.search_tags.is_empty()
            && self.price_range == full_price_range()
            && self.categories.is_empty()
            && !self.in_stock_only
    }
}

/// One hand-maintained relevance override for a query the generic substring
/// pass gets wrong. Every listed term group must be satisfied for a product
/// to survive. Remove an entry once the catalog data stops needing it.
struct SearchException {
    queries: &'static [&'static str],
    title_terms: &'static [&'static str],
    title_or_vendor_terms: &'static [&'static str],
    title_or_variant_terms: &'static [&'static str],
}

const SEARCH_EXCEPTIONS: &[SearchException] = &[
    // "accélérateur xiaomi - noir" also substring-matches every Xiaomi
    // scooter; pin it to accelerator products in the right colour.
    SearchException {
        queries: &["accélérateur xiaomi - noir", "accélérateur xiaomi noir"],
        title_terms: &["accélérateur"],
        title_or_vendor_terms: &["xiaomi"],
        title_or_variant_terms: &["noir"],
    },
];

impl SearchException {
    fn matches(&self, product: &Product) -> bool {
        let title = product.title.to_lowercase();
        let vendor = product
            .vendor
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        self.title_terms.iter().all(|term| title.contains(term))
            && self
                .title_or_vendor_terms
                .iter()
                .all(|term| title.contains(term) || vendor.contains(term))
            && self.title_or_variant_terms.iter().all(|term| {
                title.contains(term)
                    || product
                        .variants
                        .iter()
                        .any(|v| v.title.to_lowercase().contains(term))
            })
    }
}

fn exception_for(query: &str) -> Option<&'static SearchException> {
    let needle = query.trim().to_lowercase();
    SEARCH_EXCEPTIONS
        .iter()
        .find(|rule| rule.queries.contains(&needle.as_str()))
}

/// True when `product` carries `tag`, either literally or through one of
/// the derived tag rules.
fn tag_matches(product: &Product, tag: &str, now: DateTime<Utc>) -> bool {
    if product.tags.iter().any(|t| t == tag) {
        return true;
    }
    let tag_lower = tag.to_lowercase();
    if product
        .product_type
        .as_deref()
        .is_some_and(|kind| kind.to_lowercase().contains(&tag_lower))
    {
        return true;
    }
    match tag {
        TAG_XIAOMI => mentions_xiaomi(product),
        TAG_PROMOTIONS => product.variants.iter().any(Variant::is_discounted),
        TAG_NEW_ARRIVALS => product.created_at.is_some_and(|created| {
            now.signed_duration_since(created) <= Duration::days(NEW_ARRIVAL_WINDOW_DAYS)
        }),
        _ => false,
    }
}

fn mentions_xiaomi(product: &Product) -> bool {
    let needle = "xiaomi";
    product.title.to_lowercase().contains(needle)
        || product
            .vendor
            .as_deref()
            .is_some_and(|vendor| vendor.to_lowercase().contains(needle))
        || product
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(needle))
}

fn category_matches(product: &Product, categories: &[String]) -> bool {
    categories.iter().any(|category| {
        product.product_type.as_deref() == Some(category.as_str())
            || product.tags.iter().any(|t| t == category)
    })
}

/// Runs the filter pipeline and returns indices into `products`, in
/// catalog order. `now` anchors the "Nouveautés" recency window.
#[must_use]
pub fn filtered_indices(
    products: &[Product],
    state: &FilterState,
    now: DateTime<Utc>,
) -> Vec<usize> {
    if products.is_empty() {
        return Vec::new();
    }
    let mut current: Vec<usize> = (0..products.len()).collect();

    let variants = query_variants(&state.search_query);
    if !variants.is_empty() {
        if let Some(rule) = exception_for(&state.search_query) {
            current.retain(|&i| rule.matches(&products[i]));
        } else {
            current.retain(|&i| matches_query(&products[i], &variants));
        }
        tracing::debug!(pass = "text", remaining = current.len(), "catalog filter pass");
    }

    if !state.search_tags.is_empty() {
        current.retain(|&i| {
            state
                .search_tags
                .iter()
                .any(|tag| tag_matches(&products[i], tag, now))
        });
        tracing::debug!(pass = "tags", remaining = current.len(), "catalog filter pass");
    }

    if state.price_range != full_price_range() {
        let (min, max) = state.price_range;
        current.retain(|&i| {
            products[i]
                .min_price()
                .is_some_and(|price| price >= min && price <= max)
        });
        tracing::debug!(pass = "price", remaining = current.len(), "catalog filter pass");
    }

    if !state.categories.is_empty() {
        current.retain(|&i| category_matches(&products[i], &state.categories));
        tracing::debug!(
            pass = "category",
            remaining = current.len(),
            "catalog filter pass"
        );
    }

    if state.in_stock_only {
        current.retain(|&i| products[i].in_stock());
        tracing::debug!(pass = "stock", remaining = current.len(), "catalog filter pass");
    }

    current
}

/// Reference-returning convenience over [`filtered_indices`].
#[must_use]
pub fn apply_filters<'a>(
    products: &'a [Product],
    state: &FilterState,
    now: DateTime<Utc>,
) -> Vec<&'a Product> {
    filtered_indices(products, state, now)
        .into_iter()
        .map(|i| &products[i])
        .collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
