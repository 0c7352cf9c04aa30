//! Short, persisted history of resolved city names.

use anyhow::{Context, Result};

use crate::storage::KeyValueStore;

/// Storage key holding the JSON-encoded list.
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

pub const MAX_RECENT_SEARCHES: usize = 5;

/// Most-recent-first list of distinct (case-insensitive) city names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    names: Vec<String>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the list from `store`. Unreadable data yields an empty list.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(RECENT_SEARCHES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::new(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read recent searches");
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(names) => {
                let mut recent = Self::new();
                // Oldest first so the stored head ends up back at the front.
                for name in names.iter().rev() {
                    recent.record(name);
                }
                recent
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed recent searches");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&self.names).context("Failed to encode recent searches")?;
        store.set(RECENT_SEARCHES_KEY, json)
    }

    /// Put `name` at the front, dropping any earlier spelling of it and
    /// anything past the cap.
    pub fn record(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let lower = name.to_lowercase();
        self.names.retain(|n| n.to_lowercase() != lower);
        self.names.insert(0, name.to_string());
        self.names.truncate(MAX_RECENT_SEARCHES);
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 1-based lookup, matching how shortcuts are numbered on screen.
    pub fn nth(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
