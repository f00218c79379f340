use std::time::Duration;

use reqwest::Client;

use voltige_core::{AppConfig, Product};

use crate::convert::flatten_product;
use crate::error::StorefrontError;
use crate::types::GraphQlResponse;

/// The products document sent on every catalog fetch. `$query` is the
/// free-text search term and is null for a full catalog load.
const PRODUCTS_QUERY: &str = r"
query Products($first: Int!, $after: String, $query: String) {
  products(first: $first, after: $after, query: $query) {
    pageInfo {
      hasNextPage
      endCursor
    }
    edges {
      node {
        id
        title
        handle
        description
        productType
        vendor
        tags
        availableForSale
        createdAt
        priceRange {
          minVariantPrice { amount currencyCode }
          maxVariantPrice { amount currencyCode }
        }
        images(first: 10) {
          edges { node { url altText } }
        }
        variants(first: 50) {
          edges {
            node {
              id
              title
              availableForSale
              price { amount currencyCode }
              compareAtPrice { amount currencyCode }
              selectedOptions { name value }
            }
          }
        }
      }
    }
  }
}
";

/// One fetched page, already flattened into core products.
#[derive(Debug)]
pub struct ProductsPage {
    pub products: Vec<Product>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// HTTP client for the Storefront GraphQL endpoint
/// (`https://{shop}/api/{version}/graphql.json`).
///
/// 429, other non-2xx statuses, GraphQL-level errors and malformed bodies
/// all surface as typed errors. Requests are never retried automatically;
/// a retry is always a new caller-initiated fetch.
pub struct StorefrontClient {
    client: Client,
    endpoint: String,
    token: String,
    shop: String,
}

/// Normalizes a configured shop reference into an origin.
///
/// Accepts a bare domain (`"demo.myshopify.com"`, scheme added) or a full
/// origin (`"http://127.0.0.1:9099"`, kept as-is for tests against local
/// servers). Trailing slashes are dropped.
pub(crate) fn shop_origin(shop: &str) -> String {
    let trimmed = shop.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

impl StorefrontClient {
    /// Creates a client with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        shop: &str,
        token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StorefrontError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let origin = shop_origin(shop);
        Ok(Self {
            client,
            endpoint: format!("{origin}/api/{api_version}/graphql.json"),
            token: token.to_string(),
            shop: shop.to_string(),
        })
    }

    /// Builds a client from the application config, or `None` when no shop
    /// is configured (the caller then serves the fallback catalog).
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, StorefrontError> {
        match (&config.shop_domain, &config.storefront_token) {
            (Some(domain), Some(token)) => Ok(Some(Self::new(
                domain,
                token,
                &config.storefront_api_version,
                config.http_timeout_secs,
                &config.user_agent,
            )?)),
            _ => Ok(None),
        }
    }

    #[must_use]
    pub fn shop(&self) -> &str {
        &self.shop
    }

    /// Fetches one page of products.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::RateLimited`] — HTTP 429, with the Retry-After
    ///   value when the server sent one (default 60s).
    /// - [`StorefrontError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`StorefrontError::GraphQl`] — 200 body carrying GraphQL errors.
    /// - [`StorefrontError::MissingData`] — 200 body with neither data nor
    ///   errors.
    /// - [`StorefrontError::Http`] — network, TLS or timeout failure.
    /// - [`StorefrontError::Deserialize`] — body is not the expected JSON.
    pub async fn fetch_products_page(
        &self,
        term: Option<&str>,
        first: u32,
        after: Option<&str>,
    ) -> Result<ProductsPage, StorefrontError> {
        let body = serde_json::json!({
            "query": PRODUCTS_QUERY,
            "variables": {
                "first": first,
                "after": after,
                "query": term,
            },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Shopify-Storefront-Access-Token", &self.token)
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(StorefrontError::RateLimited {
                shop: self.shop.clone(),
                retry_after_secs,
            });
        }

        if !status.is_success() {
            return Err(StorefrontError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<GraphQlResponse>(&body).map_err(|e| {
            StorefrontError::Deserialize {
                context: format!("products page from {}", self.shop),
                source: e,
            }
        })?;

        if !parsed.errors.is_empty() {
            return Err(StorefrontError::GraphQl {
                shop: self.shop.clone(),
                messages: parsed.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        let data = parsed.data.ok_or_else(|| StorefrontError::MissingData {
            context: format!("products page from {}", self.shop),
        })?;

        let connection = data.products;
        Ok(ProductsPage {
            products: connection
                .edges
                .into_iter()
                .map(|edge| flatten_product(edge.node))
                .collect(),
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor,
        })
    }

    /// Fetches the catalog by following cursors until the last page or the
    /// `max_pages` cap. Hitting the cap logs a warning and returns the
    /// truncated list; it is not an error.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_products_page`]. A failure
    /// on any page fails the whole fetch; no partial list is returned.
    pub async fn fetch_all_products(
        &self,
        term: Option<&str>,
        page_size: u32,
        max_pages: usize,
    ) -> Result<Vec<Product>, StorefrontError> {
        let mut all_products: Vec<Product> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages_fetched = 0usize;

        loop {
            let page = self
                .fetch_products_page(term, page_size, cursor.as_deref())
                .await?;
            all_products.extend(page.products);
            pages_fetched += 1;

            if !page.has_next_page {
                break;
            }
            if pages_fetched >= max_pages {
                tracing::warn!(
                    shop = %self.shop,
                    pages_fetched,
                    products = all_products.len(),
                    "page cap reached; returning truncated catalog"
                );
                break;
            }
            cursor = page.end_cursor;
            if cursor.is_none() {
                // hasNextPage without a cursor; treat as the last page.
                break;
            }
        }

        Ok(all_products)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
