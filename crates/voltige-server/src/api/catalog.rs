use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use voltige_core::{full_price_range, CatalogBrowser, Product, SortOrder};

use crate::middleware::RequestId;

use super::{load_products, map_storefront_error, ApiError, ApiResponse, AppState, ResponseMeta};

const MAX_PER_PAGE: usize = 100;

/// Parsed `/api/catalog` parameters. `tag` and `category` repeat, so the
/// raw pair list is folded by hand instead of going through a struct
/// extractor.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct CatalogParams {
    pub query: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock: bool,
    pub sort: SortOrder,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl CatalogParams {
    /// Folds raw query pairs. Unknown keys (like the `t` cache nonce) are
    /// ignored; a value that does not parse rejects the request.
    pub(super) fn from_pairs(pairs: &[(String, String)]) -> Result<Self, String> {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "q" => params.query = value.trim().to_string(),
                "tag" => {
                    let tag = value.trim();
                    if !tag.is_empty() {
                        params.tags.push(tag.to_string());
                    }
                }
                "category" => {
                    let category = value.trim();
                    if !category.is_empty() {
                        params.categories.push(category.to_string());
                    }
                }
                "min_price" => params.min_price = Some(parse_price(key, value)?),
                "max_price" => params.max_price = Some(parse_price(key, value)?),
                "in_stock" => {
                    params.in_stock = match value.trim() {
                        "true" | "1" => true,
                        "false" | "0" => false,
                        other => return Err(format!("in_stock must be true or false, got {other}")),
                    };
                }
                "sort" => {
                    params.sort = SortOrder::from_str(value.trim())?;
                }
                "page" => {
                    params.page = Some(parse_count(key, value)?);
                }
                "per_page" => {
                    params.per_page = Some(parse_count(key, value)?);
                }
                _ => {}
            }
        }
        Ok(params)
    }
}

fn parse_price(key: &str, value: &str) -> Result<Decimal, String> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_| format!("{key} must be a decimal amount, got {value}"))
}

fn parse_count(key: &str, value: &str) -> Result<usize, String> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("{key} must be a positive integer, got {value}"))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CatalogPage {
    pub products: Vec<Product>,
    pub page: usize,
    pub per_page: usize,
    pub total_entries: usize,
    pub total_pages: usize,
    pub has_more: bool,
    pub source: String,
}

/// `GET /api/catalog` — load, filter, sort and paginate in one call.
pub(super) async fn browse_catalog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<CatalogPage>>, ApiError> {
    let params = CatalogParams::from_pairs(&pairs)
        .map_err(|reason| ApiError::new(req_id.0.clone(), "validation_error", reason))?;

    let outcome = load_products(&state, &params.query)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    let (products, source) = outcome.into_parts();

    let mut browser = CatalogBrowser::new(products, source, Utc::now());
    browser.set_per_page(
        params
            .per_page
            .unwrap_or(state.config.products_per_page)
            .clamp(1, MAX_PER_PAGE),
    );
    if !params.query.is_empty() {
        browser.set_query(params.query.clone());
    }
    if !params.tags.is_empty() {
        browser.set_tags(params.tags);
    }
    if !params.categories.is_empty() {
        browser.set_categories(params.categories);
    }
    if params.min_price.is_some() || params.max_price.is_some() {
        let (lo, hi) = full_price_range();
        browser.set_price_range(
            params.min_price.unwrap_or(lo),
            params.max_price.unwrap_or(hi),
        );
    }
    if params.in_stock {
        browser.set_in_stock_only(true);
    }
    if params.sort != SortOrder::Featured {
        browser.set_sort(params.sort);
    }
    if let Some(page) = params.page {
        browser.go_to_page(page);
    }

    let data = CatalogPage {
        products: browser.displayed().into_iter().cloned().collect(),
        page: browser.current_page(),
        per_page: browser.per_page(),
        total_entries: browser.total_filtered(),
        total_pages: browser.total_pages(),
        has_more: browser.has_more(),
        source: browser.source().label().to_string(),
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
