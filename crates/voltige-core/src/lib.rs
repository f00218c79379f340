//! Domain types and pure catalog logic shared by every voltige crate:
//! the product model, the filter/sort/pagination pipeline, browse and
//! session state, and application configuration.

use thiserror::Error;

pub mod app_config;
pub mod browse;
pub mod cart;
pub mod config;
pub mod filter;
pub mod money;
pub mod pagination;
pub mod product;
pub mod query;
pub mod sort;
pub mod store;

pub use app_config::{AppConfig, Environment};
pub use browse::{CatalogBrowser, CatalogSource, FallbackReason};
pub use cart::{Cart, CartLine, NewCartLine};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{apply_filters, filtered_indices, full_price_range, FilterState};
pub use money::parse_amount;
pub use pagination::{clamp_page, has_more, max_page, page_slice, DEFAULT_PER_PAGE};
pub use product::{Money, PriceRange, Product, ProductImage, SelectedOption, Variant};
pub use query::{matches_query, query_variants};
pub use sort::{sort_products, SortOrder};
pub use store::{CustomerAccount, StoreSession};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
