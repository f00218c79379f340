//! Session cart and account endpoints.
//!
//! Every handler resolves the visitor's [`StoreSession`] through the
//! `x-session-id` extension and answers with the full cart (or account)
//! state, so the client never has to track deltas.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use voltige_core::{Cart, CartLine, NewCartLine, StoreSession};

use crate::middleware::{RequestId, SessionId};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CartData {
    pub lines: Vec<CartLine>,
    pub total_quantity: u32,
    /// Exact decimal sum, serialized as a string.
    pub subtotal: Decimal,
}

impl CartData {
    fn from_cart(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

/// Body for `POST /api/cart/lines`. Prices travel as strings, like every
/// other amount on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AddLineBody {
    pub variant_id: String,
    pub product_handle: String,
    pub product_title: String,
    #[serde(default)]
    pub variant_title: Option<String>,
    pub unit_price: Decimal,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateLineBody {
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AccountData {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl AccountData {
    fn from_session(session: &StoreSession) -> Self {
        match session.customer() {
            Some(customer) => Self {
                logged_in: true,
                email: Some(customer.email.clone()),
                logged_in_at: Some(customer.logged_in_at),
            },
            None => Self {
                logged_in: false,
                email: None,
                logged_in_at: None,
            },
        }
    }
}

fn parse_line_id(request_id: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiError::new(
            request_id.to_string(),
            "validation_error",
            format!("cart line id must be a UUID, got {raw}"),
        )
    })
}

pub(super) async fn get_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
) -> Json<ApiResponse<CartData>> {
    let session = state.sessions.session(session_id.0).await;
    let session = session.lock().await;
    Json(ApiResponse {
        data: CartData::from_cart(&session.cart),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn add_line(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
    Json(body): Json<AddLineBody>,
) -> Result<Json<ApiResponse<CartData>>, ApiError> {
    if body.variant_id.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "variantId must not be blank",
        ));
    }

    let session = state.sessions.session(session_id.0).await;
    let mut session = session.lock().await;
    session.cart.add(NewCartLine {
        variant_id: body.variant_id,
        product_handle: body.product_handle,
        product_title: body.product_title,
        variant_title: body.variant_title.unwrap_or_else(|| "Default".to_string()),
        unit_price: body.unit_price,
        quantity: body.quantity.unwrap_or(1),
        image_url: body.image_url,
    });

    Ok(Json(ApiResponse {
        data: CartData::from_cart(&session.cart),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn update_line(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
    Path(line_id): Path<String>,
    Json(body): Json<UpdateLineBody>,
) -> Result<Json<ApiResponse<CartData>>, ApiError> {
    let line_id = parse_line_id(&req_id.0, &line_id)?;
    let session = state.sessions.session(session_id.0).await;
    let mut session = session.lock().await;

    if !session.cart.update_quantity(line_id, body.quantity) {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no cart line {line_id}"),
        ));
    }

    Ok(Json(ApiResponse {
        data: CartData::from_cart(&session.cart),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn remove_line(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
    Path(line_id): Path<String>,
) -> Result<Json<ApiResponse<CartData>>, ApiError> {
    let line_id = parse_line_id(&req_id.0, &line_id)?;
    let session = state.sessions.session(session_id.0).await;
    let mut session = session.lock().await;

    if !session.cart.remove(line_id) {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no cart line {line_id}"),
        ));
    }

    Ok(Json(ApiResponse {
        data: CartData::from_cart(&session.cart),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn clear_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
) -> Json<ApiResponse<CartData>> {
    let session = state.sessions.session(session_id.0).await;
    let mut session = session.lock().await;
    session.cart.clear();
    Json(ApiResponse {
        data: CartData::from_cart(&session.cart),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn get_account(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
) -> Json<ApiResponse<AccountData>> {
    let session = state.sessions.session(session_id.0).await;
    let session = session.lock().await;
    Json(ApiResponse {
        data: AccountData::from_session(&session),
        meta: ResponseMeta::new(req_id.0),
    })
}

/// `POST /api/account/login`
///
/// The demo store has no customer backend; any well-formed credential pair
/// signs in and the minted access token stays server-side.
pub(super) async fn login(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
    Json(body): Json<LoginBody>,
) -> Result<Json<ApiResponse<AccountData>>, ApiError> {
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "email must be a valid address",
        ));
    }
    if body.password.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "password must not be blank",
        ));
    }

    let token = format!("vtk_{}", Uuid::new_v4().simple());
    let session = state.sessions.session(session_id.0).await;
    let mut session = session.lock().await;
    session.login(email, token, Utc::now());
    tracing::info!(session = %session_id.0, "customer logged in");

    Ok(Json(ApiResponse {
        data: AccountData::from_session(&session),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn logout(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(session_id): Extension<SessionId>,
) -> Json<ApiResponse<AccountData>> {
    let session = state.sessions.session(session_id.0).await;
    let mut session = session.lock().await;
    if !session.logout() {
        tracing::debug!(session = %session_id.0, "logout with nobody signed in");
    }
    Json(ApiResponse {
        data: AccountData::from_session(&session),
        meta: ResponseMeta::new(req_id.0),
    })
}
