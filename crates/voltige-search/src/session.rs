//! Search panel state machine.
//!
//! The session is pure state plus caller-supplied [`Instant`]s, so the
//! debounce and the stale-response guard are testable without a runtime.
//! Callers feed keystrokes through [`SearchSession::input`], drive the
//! debounce with [`SearchSession::poll_due`], run the returned request
//! however they like and hand the outcome back through
//! [`SearchSession::apply_response`].

use std::time::{Duration, Instant};

use crate::index::browse_url;
use crate::recent::RecentSearches;
use crate::types::Suggestion;

/// Queries shorter than this never trigger a request.
pub const MIN_QUERY_CHARS: usize = 2;

/// Quiet time after the last keystroke before a request is issued.
pub const SUGGEST_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the panel is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView {
    Closed,
    /// Open with nothing (or too little) typed: recents and popular terms.
    Idle,
    /// Enough typed, waiting out the debounce.
    Debouncing,
    /// A request is in flight.
    Querying,
    Results(Vec<Suggestion>),
    /// The query matched nothing; `browse_url` runs it as a full catalog
    /// search instead.
    Empty { browse_url: String },
    /// The request failed; same escape hatch as [`SearchView::Empty`].
    Errored { browse_url: String },
}

/// A request the caller should run. `seq` must be echoed back to
/// [`SearchSession::apply_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestRequest {
    pub seq: u64,
    pub query: String,
}

/// How a [`SuggestRequest`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    Success(Vec<Suggestion>),
    Failed,
}

#[derive(Debug, Clone)]
struct PendingQuery {
    query: String,
    due: Instant,
}

#[derive(Debug, Clone)]
struct IssuedQuery {
    seq: u64,
    query: String,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    view: SearchView,
    query: String,
    pending: Option<PendingQuery>,
    next_seq: u64,
    issued: Option<IssuedQuery>,
    recents: RecentSearches,
    min_chars: usize,
    debounce: Duration,
}

impl SearchSession {
    #[must_use]
    pub fn new(recents: RecentSearches) -> Self {
        Self::with_settings(recents, MIN_QUERY_CHARS, SUGGEST_DEBOUNCE)
    }

    /// Session with configured minimum query length and debounce.
    #[must_use]
    pub fn with_settings(recents: RecentSearches, min_chars: usize, debounce: Duration) -> Self {
        Self {
            view: SearchView::Closed,
            query: String::new(),
            pending: None,
            next_seq: 0,
            issued: None,
            recents,
            min_chars,
            debounce,
        }
    }

    #[must_use]
    pub fn view(&self) -> &SearchView {
        &self.view
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn recents(&self) -> &RecentSearches {
        &self.recents
    }

    /// Opens the panel. Reopening always starts from the Idle view.
    pub fn open(&mut self) {
        if matches!(self.view, SearchView::Closed) {
            self.view = SearchView::Idle;
        }
    }

    /// Closes the panel and drops any un-fired request.
    pub fn close(&mut self) {
        self.view = SearchView::Closed;
        self.query.clear();
        self.pending = None;
    }

    /// Records a keystroke. Below the minimum length the panel falls back
    /// to Idle and any armed request is cancelled; otherwise the debounce
    /// deadline restarts from `now`.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.query = text.to_string();
        let term = text.trim();
        if term.chars().count() < self.min_chars {
            self.pending = None;
            self.view = SearchView::Idle;
            return;
        }
        self.pending = Some(PendingQuery {
            query: term.to_string(),
            due: now + self.debounce,
        });
        self.view = SearchView::Debouncing;
    }

    /// Issues the armed request once its deadline has passed. Each issued
    /// request gets the next sequence number; responses for anything older
    /// are ignored by [`SearchSession::apply_response`].
    pub fn poll_due(&mut self, now: Instant) -> Option<SuggestRequest> {
        if !self.pending.as_ref().is_some_and(|p| now >= p.due) {
            return None;
        }
        let pending = self.pending.take()?;
        self.next_seq += 1;
        self.issued = Some(IssuedQuery {
            seq: self.next_seq,
            query: pending.query.clone(),
        });
        self.view = SearchView::Querying;
        Some(SuggestRequest {
            seq: self.next_seq,
            query: pending.query,
        })
    }

    /// Applies a finished request. Dropped when the panel has moved on
    /// (view changed) or when `seq` is not the latest issued request, so a
    /// slow old response can never overwrite a newer one.
    pub fn apply_response(&mut self, seq: u64, outcome: SuggestOutcome) {
        if !matches!(self.view, SearchView::Querying) {
            return;
        }
        let Some(issued) = &self.issued else {
            return;
        };
        if issued.seq != seq {
            tracing::debug!(stale = seq, latest = issued.seq, "dropping stale suggest response");
            return;
        }
        let term = issued.query.clone();
        self.view = match outcome {
            SuggestOutcome::Success(results) if results.is_empty() => SearchView::Empty {
                browse_url: browse_url(&term),
            },
            SuggestOutcome::Success(results) => SearchView::Results(results),
            SuggestOutcome::Failed => SearchView::Errored {
                browse_url: browse_url(&term),
            },
        };
    }

    /// Submits the typed text as a full search. Records it in the recents,
    /// closes the panel and returns the catalog URL to navigate to. Blank
    /// input returns `None` and leaves the panel as it was.
    pub fn submit(&mut self) -> Option<String> {
        let term = self.query.trim().to_string();
        if term.is_empty() {
            return None;
        }
        self.recents.record(&term);
        let url = browse_url(&term);
        self.close();
        Some(url)
    }

    /// Follows a suggestion. The typed text (not the suggestion title) goes
    /// into the recents, the panel closes and the suggestion's URL comes
    /// back for navigation.
    pub fn select_suggestion(&mut self, suggestion: &Suggestion) -> String {
        let typed = self.query.trim().to_string();
        if !typed.is_empty() {
            self.recents.record(&typed);
        }
        let url = suggestion.url.clone();
        self.close();
        url
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
