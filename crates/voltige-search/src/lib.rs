//! Navigation search: the suggestion index, recent searches, the debounced
//! panel state machine and the suggest API client.

pub mod client;
pub mod error;
pub mod index;
pub mod recent;
pub mod session;
pub mod types;

pub use client::SearchApiClient;
pub use error::SearchError;
pub use index::{browse_url, popular_searches, SuggestIndex};
pub use recent::{RecentSearches, MAX_RECENT_SEARCHES};
pub use session::{
    SearchSession, SearchView, SuggestOutcome, SuggestRequest, MIN_QUERY_CHARS, SUGGEST_DEBOUNCE,
};
pub use types::{SuggestResponse, Suggestion, SuggestionKind};
