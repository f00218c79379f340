use std::time::Duration;

use reqwest::Client;

use crate::error::SearchError;
use crate::types::{Suggestion, SuggestResponse};

/// HTTP client for the gateway's suggest endpoint
/// (`GET {base}/api/search?q=`).
///
/// Requests are never aborted or retried here; the caller's sequence guard
/// makes a late response harmless.
pub struct SearchApiClient {
    client: Client,
    endpoint: String,
}

impl SearchApiClient {
    /// Creates a client with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let base = base_url.trim().trim_end_matches('/');
        Ok(Self {
            client,
            endpoint: format!("{base}/api/search"),
        })
    }

    /// Runs one suggestion query.
    ///
    /// # Errors
    ///
    /// - [`SearchError::UnexpectedStatus`] — any non-2xx status.
    /// - [`SearchError::Http`] — network or timeout failure.
    /// - [`SearchError::Deserialize`] — body is not the expected JSON.
    pub async fn fetch_suggestions(&self, query: &str) -> Result<Vec<Suggestion>, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<SuggestResponse>(&body).map_err(|e| {
            SearchError::Deserialize {
                context: format!("suggestions for {query:?}"),
                source: e,
            }
        })?;
        Ok(parsed.results)
    }
}
