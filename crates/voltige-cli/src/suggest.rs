//! Navigation search command.
//!
//! Drives one [`SearchSession`] round trip the way the storefront header
//! does: debounce the keystroke, issue the suggest request, apply the
//! response under the sequence guard, render whichever view the session
//! lands in, and persist the term into the recent searches.

use std::time::{Duration, Instant};

use clap::Args;

use voltige_core::AppConfig;
use voltige_search::{
    RecentSearches, SearchApiClient, SearchSession, SearchView, SuggestIndex, SuggestOutcome,
    Suggestion, SuggestionKind,
};
use voltige_storefront::{load_catalog, StorefrontClient};

/// Arguments for `suggest`.
#[derive(Debug, Args)]
pub(crate) struct SuggestArgs {
    /// Search term to suggest completions for
    term: String,

    /// Gateway base URL; a local index over the catalog is used when omitted
    #[arg(long)]
    server: Option<String>,

    /// Print the suggestions as JSON
    #[arg(long)]
    json: bool,
}

/// Fetches and prints suggestions for one term.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be constructed or the
/// recent searches file cannot be rewritten. Upstream failures are not
/// errors; they render the degraded view with its browse link.
pub(crate) async fn run_suggest(config: &AppConfig, args: &SuggestArgs) -> anyhow::Result<()> {
    let recents = RecentSearches::load(&config.recent_searches_path);
    let mut session = SearchSession::with_settings(
        recents,
        config.suggest_min_chars,
        Duration::from_millis(config.suggest_debounce_ms),
    );

    session.open();
    session.input(&args.term, Instant::now());
    if matches!(session.view(), SearchView::Idle) {
        println!(
            "type at least {} characters to get suggestions",
            config.suggest_min_chars
        );
        return Ok(());
    }

    tokio::time::sleep(Duration::from_millis(config.suggest_debounce_ms)).await;
    let Some(request) = session.poll_due(Instant::now()) else {
        anyhow::bail!("debounce elapsed but no suggest request was pending");
    };

    let outcome = fetch_outcome(config, args.server.as_deref(), &request.query).await?;
    session.apply_response(request.seq, outcome);

    match session.view() {
        SearchView::Results(results) => {
            if args.json {
                let body = serde_json::json!({ "results": results });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_suggestions(results);
            }
        }
        SearchView::Empty { browse_url } => {
            println!(
                "nothing matches \"{}\"; browse the full catalog at {browse_url}",
                request.query
            );
        }
        SearchView::Errored { browse_url } => {
            println!("suggestions are unavailable right now; browse the catalog at {browse_url}");
        }
        _ => {}
    }

    if session.submit().is_some() {
        session.recents().save(&config.recent_searches_path)?;
    }
    Ok(())
}

/// Resolves suggestions from the gateway when `--server` is given,
/// otherwise from an index built over the locally loaded catalog.
async fn fetch_outcome(
    config: &AppConfig,
    server: Option<&str>,
    query: &str,
) -> anyhow::Result<SuggestOutcome> {
    if let Some(base_url) = server {
        let api = SearchApiClient::new(base_url, config.http_timeout_secs, &config.user_agent)?;
        return Ok(match api.fetch_suggestions(query).await {
            Ok(results) => SuggestOutcome::Success(results),
            Err(err) => {
                tracing::warn!(error = %err, "suggest request failed");
                SuggestOutcome::Failed
            }
        });
    }

    let client = StorefrontClient::from_config(config)?;
    let loaded = load_catalog(
        client.as_ref(),
        query,
        config.catalog_page_size,
        config.catalog_max_pages,
    )
    .await;
    Ok(match loaded {
        Ok(outcome) => SuggestOutcome::Success(SuggestIndex::new(outcome.products()).suggest(query)),
        Err(err) => {
            tracing::warn!(error = %err, "catalog fetch failed while building suggestions");
            SuggestOutcome::Failed
        }
    })
}

fn print_suggestions(results: &[Suggestion]) {
    let header = format!("{:<10}{:<44}URL", "KIND", "TITLE");
    println!("{header}");
    for suggestion in results {
        println!(
            "{:<10}{:<44}{}",
            kind_label(suggestion.kind),
            suggestion.title,
            suggestion.url
        );
    }
}

fn kind_label(kind: SuggestionKind) -> &'static str {
    match kind {
        SuggestionKind::Product => "product",
        SuggestionKind::Brand => "brand",
        SuggestionKind::Category => "category",
        SuggestionKind::Page => "page",
    }
}
