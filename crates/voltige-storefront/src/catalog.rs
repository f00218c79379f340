//! Catalog load policy: when to serve live products, when an empty answer
//! is genuine, and when to fall back to the demo catalog.

use chrono::Utc;

use voltige_core::{CatalogSource, FallbackReason, Product};

use crate::client::StorefrontClient;
use crate::error::StorefrontError;
use crate::fallback::fallback_catalog;

/// Outcome of one catalog load.
#[derive(Debug)]
pub enum CatalogOutcome {
    /// Live products from the configured shop.
    Live(Vec<Product>),
    /// The live shop answered, and nothing matches the search term. This
    /// is a real answer; the fallback catalog is never substituted for it.
    NoMatches { term: String },
    /// The demo catalog stands in for the live one.
    Degraded {
        products: Vec<Product>,
        reason: FallbackReason,
    },
}

impl CatalogOutcome {
    #[must_use]
    pub fn source(&self) -> CatalogSource {
        match self {
            Self::Live(_) | Self::NoMatches { .. } => CatalogSource::Live,
            Self::Degraded { reason, .. } => CatalogSource::Fallback(reason.clone()),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        match self {
            Self::Live(products) | Self::Degraded { products, .. } => products,
            Self::NoMatches { .. } => &[],
        }
    }

    /// Splits into the product list and its source marker.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Product>, CatalogSource) {
        let source = self.source();
        match self {
            Self::Live(products) | Self::Degraded { products, .. } => (products, source),
            Self::NoMatches { .. } => (Vec::new(), source),
        }
    }
}

/// Loads the catalog, applying the degraded-mode policy.
///
/// With no client configured the demo catalog is served outright. With a
/// client, a failed or empty full-catalog load degrades to the demo
/// catalog (logged at warn); a search term changes that: an empty result
/// is reported as [`CatalogOutcome::NoMatches`] and a fetch failure
/// propagates so the caller can render a retryable error.
///
/// # Errors
///
/// Returns the underlying [`StorefrontError`] only when `term` is
/// non-empty and the live fetch fails.
pub async fn load_catalog(
    client: Option<&StorefrontClient>,
    term: &str,
    page_size: u32,
    max_pages: usize,
) -> Result<CatalogOutcome, StorefrontError> {
    let trimmed = term.trim();
    let Some(client) = client else {
        tracing::warn!("storefront not configured; serving the fallback catalog");
        return Ok(CatalogOutcome::Degraded {
            products: fallback_catalog(Utc::now()),
            reason: FallbackReason::NotConfigured,
        });
    };

    let term_opt = (!trimmed.is_empty()).then_some(trimmed);
    match client.fetch_all_products(term_opt, page_size, max_pages).await {
        Ok(products) if !products.is_empty() => Ok(CatalogOutcome::Live(products)),
        Ok(_) => {
            if let Some(term) = term_opt {
                Ok(CatalogOutcome::NoMatches {
                    term: term.to_string(),
                })
            } else {
                tracing::warn!(shop = %client.shop(), "live catalog is empty; serving the fallback catalog");
                Ok(CatalogOutcome::Degraded {
                    products: fallback_catalog(Utc::now()),
                    reason: FallbackReason::EmptyCatalog,
                })
            }
        }
        Err(err) if term_opt.is_none() => {
            tracing::warn!(shop = %client.shop(), error = %err, "catalog fetch failed; serving the fallback catalog");
            Ok(CatalogOutcome::Degraded {
                products: fallback_catalog(Utc::now()),
                reason: FallbackReason::Upstream(err.to_string()),
            })
        }
        Err(err) => Err(err),
    }
}
