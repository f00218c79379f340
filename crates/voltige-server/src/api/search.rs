use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use voltige_search::{SuggestIndex, SuggestResponse};

use crate::middleware::RequestId;

use super::{load_products, map_storefront_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
}

/// `GET /api/search` — grouped navigation suggestions.
///
/// The product group is matched against whatever catalog the load policy
/// returns (live, or the demo catalog when degraded); brands, categories
/// and site pages always come from the static lists. The response is the
/// bare `{ results }` shape the search panel consumes.
pub(super) async fn suggest(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let term = query.q.as_deref().unwrap_or("").trim();
    if term.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "query parameter q must not be blank",
        ));
    }

    let outcome = load_products(&state, term)
        .await
        .map_err(|e| map_storefront_error(req_id.0, &e))?;

    let results = SuggestIndex::new(outcome.products()).suggest(term);
    tracing::debug!(term, results = results.len(), "suggest query served");
    Ok(Json(SuggestResponse { results }))
}
