//! Shopify Storefront GraphQL client, the demo fallback catalog and the
//! degraded-mode load policy.

pub mod catalog;
pub mod client;
pub mod convert;
pub mod error;
pub mod fallback;
pub mod types;

pub use catalog::{load_catalog, CatalogOutcome};
pub use client::{ProductsPage, StorefrontClient};
pub use error::StorefrontError;
pub use fallback::fallback_catalog;
