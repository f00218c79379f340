//! Recent searches command.

use voltige_core::AppConfig;
use voltige_search::{popular_searches, RecentSearches};

/// Prints or clears the persisted recent searches.
///
/// # Errors
///
/// Returns an error when clearing and the file cannot be rewritten.
pub(crate) fn run_recent(config: &AppConfig, clear: bool) -> anyhow::Result<()> {
    let path = config.recent_searches_path.as_path();
    let mut recents = RecentSearches::load(path);

    if clear {
        if recents.is_empty() {
            println!("no recent searches stored");
            return Ok(());
        }
        recents.clear();
        recents.save(path)?;
        println!("recent searches cleared");
        return Ok(());
    }

    if recents.is_empty() {
        println!("no recent searches yet; try `voltige-cli suggest <term>`");
        println!("popular right now: {}", popular_searches().join(", "));
        return Ok(());
    }

    for (position, entry) in recents.entries().iter().enumerate() {
        println!("{}. {entry}", position + 1);
    }
    Ok(())
}
