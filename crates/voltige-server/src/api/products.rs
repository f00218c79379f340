use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use voltige_core::Product;

use crate::middleware::RequestId;

use super::{load_products, map_storefront_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// The envelope the storefront frontend expects from the products proxy,
/// shaped like the raw GraphQL connection.
#[derive(Debug, Serialize)]
pub(super) struct ProxyEnvelope {
    pub data: ProxyData,
}

#[derive(Debug, Serialize)]
pub(super) struct ProxyData {
    pub products: ProxyProducts,
}

#[derive(Debug, Serialize)]
pub(super) struct ProxyProducts {
    pub edges: Vec<ProxyEdge>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProxyEdge {
    pub node: Product,
}

/// Query for the proxy. The frontend also appends `t`, a cache-busting
/// nonce; leaving it undeclared accepts and ignores it.
#[derive(Debug, Deserialize)]
pub(super) struct ProxyQuery {
    pub q: Option<String>,
}

/// `GET /api/shopify-products` — the catalog proxy.
///
/// Serves the loaded catalog in the platform envelope and marks where it
/// came from in the `x-catalog-source` header. An upstream failure only
/// surfaces as an error when a search term was given; a plain catalog load
/// degrades to the demo catalog instead.
pub(super) async fn shopify_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProxyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let term = query.q.as_deref().unwrap_or("");
    let outcome = load_products(&state, term)
        .await
        .map_err(|e| map_storefront_error(req_id.0, &e))?;

    let (products, source) = outcome.into_parts();
    let envelope = ProxyEnvelope {
        data: ProxyData {
            products: ProxyProducts {
                edges: products.into_iter().map(|node| ProxyEdge { node }).collect(),
            },
        },
    };
    Ok(([("x-catalog-source", source.label())], Json(envelope)))
}

#[derive(Debug, Deserialize)]
pub(super) struct RelatedQuery {
    pub limit: Option<usize>,
}

fn normalize_related_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(4).clamp(1, 12)
}

fn tag_overlap(anchor: &Product, candidate: &Product) -> usize {
    candidate
        .tags
        .iter()
        .filter(|tag| anchor.tags.contains(tag))
        .count()
}

/// Products sharing the anchor's type, the ones with the most shared tags
/// first. Catalog order breaks ties; the anchor itself never appears.
pub(super) fn related_products<'a>(
    products: &'a [Product],
    anchor: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    let mut related: Vec<&Product> = products
        .iter()
        .filter(|p| p.handle != anchor.handle)
        .filter(|p| anchor.product_type.is_none() || p.product_type == anchor.product_type)
        .collect();
    related.sort_by_key(|p| std::cmp::Reverse(tag_overlap(anchor, p)));
    related.truncate(limit);
    related
}

/// `GET /api/products/{handle}/related`
pub(super) async fn list_related(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
    Query(query): Query<RelatedQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let outcome = load_products(&state, "")
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    let (products, _source) = outcome.into_parts();

    let Some(anchor) = products.iter().find(|p| p.handle == handle) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no product with handle {handle}"),
        ));
    };

    let data: Vec<Product> = related_products(&products, anchor, normalize_related_limit(query.limit))
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
