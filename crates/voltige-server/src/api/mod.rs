mod cart;
mod catalog;
mod products;
mod search;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use voltige_core::AppConfig;
use voltige_storefront::{load_catalog, CatalogOutcome, StorefrontClient, StorefrontError};

use crate::middleware::{enforce_rate_limit, request_id, session_id, RateLimitState, RequestId};
use crate::sessions::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storefront: Option<Arc<StorefrontClient>>,
    pub sessions: SessionStore,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    storefront: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Runs the catalog load policy with the app's configured client and fetch
/// caps.
pub(super) async fn load_products(
    state: &AppState,
    term: &str,
) -> Result<CatalogOutcome, StorefrontError> {
    load_catalog(
        state.storefront.as_deref(),
        term,
        state.config.catalog_page_size,
        state.config.catalog_max_pages,
    )
    .await
}

pub(super) fn map_storefront_error(request_id: String, error: &StorefrontError) -> ApiError {
    tracing::error!(error = %error, "storefront fetch failed");
    ApiError::new(
        request_id,
        "upstream_error",
        "the product catalog is temporarily unavailable",
    )
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
            HeaderName::from_static("x-session-id"),
        ])
        .expose_headers([
            HeaderName::from_static("x-request-id"),
            HeaderName::from_static("x-session-id"),
            HeaderName::from_static("x-catalog-source"),
        ])
}

fn rate_limited_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/shopify-products", get(products::shopify_products))
        .route("/api/catalog", get(catalog::browse_catalog))
        .route(
            "/api/products/{handle}/related",
            get(products::list_related),
        )
        .route("/api/search", get(search::suggest))
        .route("/api/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/api/cart/lines", post(cart::add_line))
        .route(
            "/api/cart/lines/{line_id}",
            patch(cart::update_line).delete(cart::remove_line),
        )
        .route("/api/account", get(cart::get_account))
        .route("/api/account/login", post(cart::login))
        .route("/api/account/logout", post(cart::logout))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(rate_limited_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(axum::middleware::from_fn(session_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let storefront = if state.storefront.is_some() {
        "configured"
    } else {
        "unconfigured"
    };
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            storefront,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}
