//! Local favorites mirror and pagination bookkeeping
//!
//! The mirror is a cache of the remote watchlist's entries. It is ordered as
//! the server returned it and never holds two entries for the same exhibitor.

use std::collections::HashSet;

use crate::api::{FavoriteEntry, ORGANIZATION};

/// Parse the `amount-all` header value; absent or malformed means unknown
pub fn parse_total_count(header: Option<&str>) -> Option<u64> {
    header.and_then(|value| value.trim().parse().ok())
}

/// Whether another page must be requested after `fetched` entries.
///
/// An unknown total is treated as "no more pages".
pub fn has_more_pages(fetched: u64, total_count: Option<u64>) -> bool {
    match total_count {
        Some(total) => total > fetched,
        None => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesMirror {
    entries: Vec<FavoriteEntry>,
}

impl FavoritesMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the mirror with a freshly fetched entry list.
    ///
    /// Later duplicates of an exhibitor are dropped so the uniqueness
    /// invariant holds even if the server returns one twice.
    pub fn replace(&mut self, entries: Vec<FavoriteEntry>) {
        let mut seen = HashSet::new();
        self.entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.entity.id.clone()))
            .collect();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, exhibitor_id: &str) -> bool {
        self.entries.iter().any(|e| e.entity.id == exhibitor_id)
    }

    /// Entry id for an exhibitor, if it is in the mirror
    pub fn entry_id(&self, exhibitor_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.entity.id == exhibitor_id)
            .map(|e| e.id.as_str())
    }

    /// Append an entry unless its exhibitor is already present.
    ///
    /// Returns false if the entry was a duplicate.
    pub fn insert(&mut self, entry: FavoriteEntry) -> bool {
        if self.contains(&entry.entity.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove by entry id. Returns false if nothing matched.
    pub fn remove_entry(&mut self, entry_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != entry_id);
        self.entries.len() != before
    }

    /// Exhibitor ids of all organization entries, in mirror order
    pub fn exhibitor_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.entity.entity_type == ORGANIZATION)
            .map(|e| e.entity.id.clone())
            .collect()
    }
}
