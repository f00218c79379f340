use std::time::{Duration, Instant};

use super::*;
use crate::types::SuggestionKind;

fn suggestion(title: &str, url: &str) -> Suggestion {
    Suggestion {
        kind: SuggestionKind::Product,
        title: title.to_string(),
        url: url.to_string(),
        description: None,
        image: None,
    }
}

fn open_session() -> SearchSession {
    let mut session = SearchSession::new(RecentSearches::default());
    session.open();
    session
}

// ---------------------------------------------------------------------------
// Panel lifecycle
// ---------------------------------------------------------------------------

#[test]
fn opens_to_idle_and_closes_back() {
    let mut session = SearchSession::new(RecentSearches::default());
    assert_eq!(*session.view(), SearchView::Closed);

    session.open();
    assert_eq!(*session.view(), SearchView::Idle);

    session.close();
    assert_eq!(*session.view(), SearchView::Closed);
    assert_eq!(session.query(), "");
}

#[test]
fn reopening_resets_to_idle_and_keeps_recents() {
    let mut session = open_session();
    session.input("casque", Instant::now());
    let url = session.submit().unwrap();
    assert_eq!(url, "/boutique?q=casque");
    assert_eq!(*session.view(), SearchView::Closed);

    session.open();
    assert_eq!(*session.view(), SearchView::Idle);
    assert_eq!(session.recents().entries(), ["casque"]);
}

// ---------------------------------------------------------------------------
// Debounce
// ---------------------------------------------------------------------------

#[test]
fn short_input_stays_idle_and_issues_nothing() {
    let t0 = Instant::now();
    let mut session = open_session();

    session.input("x", t0);
    assert_eq!(*session.view(), SearchView::Idle);
    assert!(session.poll_due(t0 + Duration::from_secs(5)).is_none());
}

#[test]
fn two_chars_counts_characters_not_bytes() {
    let t0 = Instant::now();
    let mut session = open_session();

    // "né" is two chars even though it is three bytes.
    session.input("né", t0);
    assert_eq!(*session.view(), SearchView::Debouncing);
}

#[test]
fn request_fires_only_after_the_debounce() {
    let t0 = Instant::now();
    let mut session = open_session();
    session.input("xiaomi", t0);

    assert!(session.poll_due(t0 + Duration::from_millis(299)).is_none());
    assert_eq!(*session.view(), SearchView::Debouncing);

    let request = session
        .poll_due(t0 + SUGGEST_DEBOUNCE)
        .expect("deadline reached, request expected");
    assert_eq!(request.seq, 1);
    assert_eq!(request.query, "xiaomi");
    assert_eq!(*session.view(), SearchView::Querying);

    assert!(
        session.poll_due(t0 + Duration::from_secs(1)).is_none(),
        "an issued request must not fire twice"
    );
}

#[test]
fn each_keystroke_restarts_the_debounce() {
    let t0 = Instant::now();
    let mut session = open_session();

    session.input("xiaomi", t0);
    session.input("xiaomi pro", t0 + Duration::from_millis(200));

    assert!(
        session.poll_due(t0 + Duration::from_millis(300)).is_none(),
        "the first deadline was cancelled by the second keystroke"
    );

    let request = session
        .poll_due(t0 + Duration::from_millis(500))
        .expect("second deadline passed");
    assert_eq!(request.query, "xiaomi pro");
    assert_eq!(request.seq, 1, "the un-fired request consumed no sequence number");
}

#[test]
fn erasing_below_the_minimum_cancels_the_pending_request() {
    let t0 = Instant::now();
    let mut session = open_session();

    session.input("xiaomi", t0);
    session.input("x", t0 + Duration::from_millis(100));

    assert_eq!(*session.view(), SearchView::Idle);
    assert!(session.poll_due(t0 + Duration::from_secs(1)).is_none());
}

#[test]
fn issued_query_is_trimmed() {
    let t0 = Instant::now();
    let mut session = open_session();
    session.input("  casque ", t0);
    let request = session.poll_due(t0 + SUGGEST_DEBOUNCE).unwrap();
    assert_eq!(request.query, "casque");
}

// ---------------------------------------------------------------------------
// Responses and the stale guard
// ---------------------------------------------------------------------------

#[test]
fn success_with_results_shows_them() {
    let t0 = Instant::now();
    let mut session = open_session();
    session.input("xiaomi", t0);
    let request = session.poll_due(t0 + SUGGEST_DEBOUNCE).unwrap();

    let results = vec![suggestion("Mi Pro 2", "/produits/trottinette-xiaomi-mi-pro-2")];
    session.apply_response(request.seq, SuggestOutcome::Success(results.clone()));
    assert_eq!(*session.view(), SearchView::Results(results));
}

#[test]
fn success_without_results_offers_the_browse_url() {
    let t0 = Instant::now();
    let mut session = open_session();
    session.input("hoverboard", t0);
    let request = session.poll_due(t0 + SUGGEST_DEBOUNCE).unwrap();

    session.apply_response(request.seq, SuggestOutcome::Success(Vec::new()));
    assert_eq!(
        *session.view(),
        SearchView::Empty {
            browse_url: "/boutique?q=hoverboard".to_string()
        }
    );
}

#[test]
fn failure_offers_the_same_browse_url() {
    let t0 = Instant::now();
    let mut session = open_session();
    session.input("hoverboard", t0);
    let request = session.poll_due(t0 + SUGGEST_DEBOUNCE).unwrap();

    session.apply_response(request.seq, SuggestOutcome::Failed);
    assert_eq!(
        *session.view(),
        SearchView::Errored {
            browse_url: "/boutique?q=hoverboard".to_string()
        }
    );
}

#[test]
fn stale_response_never_overwrites_a_newer_request() {
    let t0 = Instant::now();
    let mut session = open_session();

    session.input("xiaomi", t0);
    let first = session.poll_due(t0 + SUGGEST_DEBOUNCE).unwrap();

    // The user keeps typing, a second request goes out.
    session.input("xiaomi pro", t0 + Duration::from_millis(400));
    let second = session
        .poll_due(t0 + Duration::from_millis(700))
        .expect("second request");
    assert_eq!(second.seq, 2);

    // The slow first response lands afterwards and must be dropped.
    session.apply_response(first.seq, SuggestOutcome::Success(vec![suggestion("old", "/old")]));
    assert_eq!(*session.view(), SearchView::Querying);

    let fresh = vec![suggestion("Mi Pro 2", "/produits/trottinette-xiaomi-mi-pro-2")];
    session.apply_response(second.seq, SuggestOutcome::Success(fresh.clone()));
    assert_eq!(*session.view(), SearchView::Results(fresh));
}

#[test]
fn response_after_typing_resumed_is_dropped() {
    let t0 = Instant::now();
    let mut session = open_session();

    session.input("xiaomi", t0);
    let request = session.poll_due(t0 + SUGGEST_DEBOUNCE).unwrap();

    // More typing moved the panel back to Debouncing before the response.
    session.input("xiaomi p", t0 + Duration::from_millis(350));
    session.apply_response(request.seq, SuggestOutcome::Success(vec![suggestion("old", "/old")]));
    assert_eq!(*session.view(), SearchView::Debouncing);
}

#[test]
fn response_after_erasing_to_idle_is_dropped() {
    let t0 = Instant::now();
    let mut session = open_session();

    session.input("xiaomi", t0);
    let request = session.poll_due(t0 + SUGGEST_DEBOUNCE).unwrap();

    session.input("", t0 + Duration::from_millis(350));
    session.apply_response(request.seq, SuggestOutcome::Failed);
    assert_eq!(*session.view(), SearchView::Idle);
}

// ---------------------------------------------------------------------------
// Submit and selection
// ---------------------------------------------------------------------------

#[test]
fn submit_records_and_returns_the_encoded_browse_url() {
    let mut session = open_session();
    session.input("trottinette électrique", Instant::now());

    let url = session.submit().expect("non-blank submit navigates");
    assert_eq!(url, "/boutique?q=trottinette%20%C3%A9lectrique");
    assert_eq!(*session.view(), SearchView::Closed);
    assert_eq!(session.recents().entries(), ["trottinette électrique"]);
}

#[test]
fn blank_submit_navigates_nowhere() {
    let mut session = open_session();
    session.input("   ", Instant::now());
    assert!(session.submit().is_none());
    assert_eq!(*session.view(), SearchView::Idle);
}

#[test]
fn selecting_a_suggestion_records_the_typed_text() {
    let t0 = Instant::now();
    let mut session = open_session();
    session.input("mi pro", t0);
    let request = session.poll_due(t0 + SUGGEST_DEBOUNCE).unwrap();

    let picked = suggestion("Trottinette Xiaomi Mi Pro 2", "/produits/trottinette-xiaomi-mi-pro-2");
    session.apply_response(request.seq, SuggestOutcome::Success(vec![picked.clone()]));

    let url = session.select_suggestion(&picked);
    assert_eq!(url, "/produits/trottinette-xiaomi-mi-pro-2");
    assert_eq!(*session.view(), SearchView::Closed);
    assert_eq!(
        session.recents().entries(),
        ["mi pro"],
        "the typed text goes into the recents, not the suggestion title"
    );
}
