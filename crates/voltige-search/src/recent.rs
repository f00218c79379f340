//! Recent searches, most recent first, persisted as a plain JSON array of
//! strings so older snapshots keep loading.

use std::fs;
use std::path::Path;

use crate::error::SearchError;

pub const MAX_RECENT_SEARCHES: usize = 3;

/// Bounded most-recent-first list of submitted search terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    /// Builds a list from raw entries, applying the same trimming, exact
    /// dedup and cap that [`RecentSearches::record`] enforces.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut recents = Self::default();
        for entry in entries {
            let entry = entry.into();
            let trimmed = entry.trim();
            if trimmed.is_empty() || recents.entries.iter().any(|e| e == trimmed) {
                continue;
            }
            if recents.entries.len() == MAX_RECENT_SEARCHES {
                break;
            }
            recents.entries.push(trimmed.to_string());
        }
        recents
    }

    /// Records a submitted term at the front. Blank input is ignored, an
    /// exact duplicate moves to the front instead of repeating, and the list
    /// never grows past [`MAX_RECENT_SEARCHES`].
    pub fn record(&mut self, term: &str) {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            return;
        }
        self.entries.retain(|e| e != trimmed);
        self.entries.insert(0, trimmed.to_string());
        self.entries.truncate(MAX_RECENT_SEARCHES);
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Loads the persisted list. A missing file is a fresh start and an
    /// unreadable or corrupt one is logged and treated the same, so a bad
    /// snapshot never blocks the search box.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read recent searches, starting empty");
                return Self::default();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(entries) => Self::from_entries(entries),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "corrupt recent searches file, starting empty");
                Self::default()
            }
        }
    }

    /// Writes the list as a JSON array, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Io`] when the directory or file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), SearchError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SearchError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.entries).unwrap_or_else(|_| "[]".to_string());
        fs::write(path, json).map_err(|source| SearchError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
