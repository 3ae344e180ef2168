//! Hall Plan Model
//!
//! The exhibitors shown on the plan, which of them are favorites, and the
//! current list selection.

use serde::Deserialize;
use std::collections::HashSet;

use crate::logic::navigation::{clamp_selection, next_selection, prev_selection};
use crate::SyncStatus;

/// One exhibitor (map marker) on the hall plan
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Exhibitor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hall: Option<String>,
    #[serde(default)]
    pub booth: Option<String>,
}

impl Exhibitor {
    /// "Hall 3 / B12" style location, empty if unknown
    pub fn location(&self) -> String {
        match (&self.hall, &self.booth) {
            (Some(hall), Some(booth)) => format!("{} / {}", hall, booth),
            (Some(hall), None) => hall.clone(),
            (None, Some(booth)) => booth.clone(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HallplanModel {
    pub exhibitors: Vec<Exhibitor>,

    /// Exhibitor ids currently marked as favorites
    pub favorites: HashSet<String>,

    /// Legacy seed list from launch parameters, shown when sync is unavailable
    pub seed_favorites: Vec<String>,

    pub selected: Option<usize>,

    pub sync_status: SyncStatus,
}

impl HallplanModel {
    pub fn new(exhibitors: Vec<Exhibitor>, seed_favorites: Vec<String>) -> Self {
        let selected = clamp_selection(None, exhibitors.len());
        Self {
            exhibitors,
            favorites: HashSet::new(),
            seed_favorites,
            selected,
            sync_status: SyncStatus::Loading,
        }
    }

    /// Initialize the favorites display from the resolved id set
    pub fn init_favorites(&mut self, favorite_ids: Vec<String>) {
        self.favorites = favorite_ids.into_iter().collect();
        self.sync_status = SyncStatus::Ready;
    }

    /// Fall back to the seed list when the watchlist is out of reach
    pub fn mark_unavailable(&mut self) {
        self.favorites = self.seed_favorites.iter().cloned().collect();
        self.sync_status = SyncStatus::Unavailable;
    }

    pub fn is_favorite(&self, exhibitor_id: &str) -> bool {
        self.favorites.contains(exhibitor_id)
    }

    pub fn favorite_count(&self) -> usize {
        self.exhibitors
            .iter()
            .filter(|e| self.is_favorite(&e.id))
            .count()
    }

    pub fn selected_exhibitor(&self) -> Option<&Exhibitor> {
        self.selected.and_then(|idx| self.exhibitors.get(idx))
    }

    pub fn select_next(&mut self) {
        self.selected = next_selection(self.selected, self.exhibitors.len());
    }

    pub fn select_previous(&mut self) {
        self.selected = prev_selection(self.selected, self.exhibitors.len());
    }
}
