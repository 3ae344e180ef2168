//! Favorites synchronization
//!
//! Owns the resolved watchlist id and the local favorites mirror for one
//! session, and keeps the mirror consistent with the remote watchlist.
//! Failures are logged and degrade to empty/no-op results; only session
//! expiry halts the flow.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{FavoriteEntry, Watchlist, WatchlistApi, PAGE_SIZE};
use crate::config::Session;
use crate::logic::errors::{classify_error, is_expiry};
use crate::logic::favorites::{has_more_pages, FavoritesMirror};
use crate::logic::watchlists::{eligible_watchlists, hallplan_watchlist_request};
use crate::services::preferences::PreferenceStore;
use crate::services::sync::SyncNotice;

/// Asks the user to choose one of several watchlists
#[async_trait]
pub trait WatchlistPicker: Send + Sync {
    async fn pick(&self, watchlists: Vec<Watchlist>, preselected: Option<String>)
        -> Result<String>;
}

pub struct FavoritesSync<A: WatchlistApi, S: PreferenceStore> {
    api: A,
    store: S,
    notices: mpsc::UnboundedSender<SyncNotice>,
    authenticated: bool,
    label: Option<String>,
    watchlist_id: Option<String>,
    mirror: FavoritesMirror,
    show_change_watchlist: bool,
    expired: bool,
}

impl<A: WatchlistApi, S: PreferenceStore> FavoritesSync<A, S> {
    pub fn new(
        session: &Session,
        api: A,
        store: S,
        notices: mpsc::UnboundedSender<SyncNotice>,
    ) -> Self {
        Self {
            api,
            store,
            notices,
            authenticated: session.is_authenticated(),
            label: None,
            watchlist_id: None,
            mirror: FavoritesMirror::new(),
            show_change_watchlist: false,
            expired: false,
        }
    }

    /// Restrict the watchlist listing to one label
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn watchlist_id(&self) -> Option<&str> {
        self.watchlist_id.as_deref()
    }

    pub fn mirror(&self) -> &FavoritesMirror {
        &self.mirror
    }

    pub fn favorite_ids(&self) -> Vec<String> {
        self.mirror.exhibitor_ids()
    }

    /// Whether the "change watchlist" affordance should be offered
    pub fn show_change_watchlist(&self) -> bool {
        self.show_change_watchlist
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Nothing may reach the API without a token or after expiry
    fn is_halted(&self) -> bool {
        !self.authenticated || self.expired
    }

    /// Halt the session; the first call sends the only `SessionExpired` notice
    pub fn expire(&mut self) {
        if self.expired {
            return;
        }
        self.expired = true;
        warn!("Session token expired, halting favorites sync");
        let _ = self.notices.send(SyncNotice::SessionExpired);
    }

    /// Log a failed call; expiry halts the session instead
    fn absorb(&mut self, what: &str, error: anyhow::Error) {
        if is_expiry(&error) {
            self.expire();
        } else {
            warn!("{} ({:?}): {:#}", what, classify_error(&error), error);
        }
    }

    /// Determine which watchlist to operate against and remember it.
    ///
    /// Order: validated stored preference, then the single eligible watchlist,
    /// then the user's pick among several, then a newly created one.
    pub async fn resolve_watchlist_id(&mut self, picker: &dyn WatchlistPicker) -> Option<String> {
        self.watchlist_id = None;
        if self.is_halted() {
            return None;
        }

        if let Some(stored) = self.load_preference() {
            match self.api.watchlist_exists(&stored).await {
                Ok(true) => {
                    debug!("Using stored watchlist {}", stored);
                    self.show_change_watchlist = true;
                    self.watchlist_id = Some(stored.clone());
                    return Some(stored);
                }
                Ok(false) => {
                    info!("Stored watchlist {} no longer available", stored);
                    self.clear_preference();
                }
                Err(e) => {
                    if is_expiry(&e) {
                        self.expire();
                        return None;
                    }
                    warn!("Failed to validate stored watchlist {}: {:#}", stored, e);
                    self.clear_preference();
                }
            }
        }

        let watchlists = match self.api.list_watchlists(self.label.as_deref()).await {
            Ok(watchlists) => eligible_watchlists(watchlists),
            Err(e) => {
                self.absorb("Error fetching watchlists", e);
                return None;
            }
        };

        let resolved = match watchlists.len() {
            0 => match self.api.create_watchlist(&hallplan_watchlist_request()).await {
                Ok(id) => {
                    info!("Created hallplan watchlist {}", id);
                    id
                }
                Err(e) => {
                    self.absorb("Error creating watchlist", e);
                    return None;
                }
            },
            1 => watchlists[0].id.clone(),
            _ => {
                let chosen = match picker.pick(watchlists, None).await {
                    Ok(id) => id,
                    Err(e) => {
                        warn!("Watchlist selection abandoned: {:#}", e);
                        return None;
                    }
                };
                self.save_preference(&chosen);
                self.show_change_watchlist = true;
                chosen
            }
        };

        self.watchlist_id = Some(resolved.clone());
        Some(resolved)
    }

    /// Fetch every entry of a watchlist, one page at a time.
    ///
    /// All-or-nothing: a failed page discards what was already fetched.
    pub async fn fetch_all_favorites(&mut self, watchlist_id: Option<&str>) -> Vec<FavoriteEntry> {
        let Some(watchlist_id) = watchlist_id else {
            return Vec::new();
        };
        if self.is_halted() {
            return Vec::new();
        }

        let mut entries: Vec<FavoriteEntry> = Vec::new();
        let mut offset = 0;

        loop {
            let page = match self.api.list_entries(watchlist_id, offset, PAGE_SIZE).await {
                Ok(page) => page,
                Err(e) => {
                    self.absorb("Error fetching watchlist entries", e);
                    return Vec::new();
                }
            };

            let received = page.items.len();
            offset = page.next_offset;
            entries.extend(page.items);

            debug!(
                "Fetched {} entries (total {:?}) from watchlist {}",
                entries.len(),
                page.total_count,
                watchlist_id
            );

            // An empty page while the total says otherwise would never end
            if received == 0 || !has_more_pages(entries.len() as u64, page.total_count) {
                break;
            }
        }

        entries
    }

    /// Re-fetch the resolved watchlist into the mirror and return favorite ids
    pub async fn sync_all(&mut self) -> Vec<String> {
        let watchlist_id = self.watchlist_id.clone();
        let entries = self.fetch_all_favorites(watchlist_id.as_deref()).await;
        self.mirror.replace(entries);
        self.mirror.exhibitor_ids()
    }

    /// Add an exhibitor to the watchlist. Returns true if the API accepted it.
    pub async fn add_favorite(&mut self, exhibitor_id: &str) -> bool {
        let Some(watchlist_id) = self.watchlist_id.clone() else {
            return false;
        };
        if self.is_halted() {
            return false;
        }

        match self.api.add_entry(&watchlist_id, exhibitor_id).await {
            Ok(entry) => {
                if !self.mirror.insert(entry) {
                    debug!("Exhibitor {} already in mirror", exhibitor_id);
                }
                true
            }
            Err(e) => {
                self.absorb("Error adding exhibitor to watchlist", e);
                false
            }
        }
    }

    /// Remove an exhibitor. Only a 204 response removes the mirror entry.
    pub async fn remove_favorite(&mut self, exhibitor_id: &str) -> bool {
        let Some(watchlist_id) = self.watchlist_id.clone() else {
            return false;
        };
        if self.is_halted() {
            return false;
        }
        let Some(entry_id) = self.mirror.entry_id(exhibitor_id).map(str::to_string) else {
            debug!("Exhibitor {} is not a favorite, nothing to remove", exhibitor_id);
            return false;
        };

        match self.api.remove_entry(&watchlist_id, &entry_id).await {
            Ok(status) if status == StatusCode::NO_CONTENT => {
                self.mirror.remove_entry(&entry_id);
                true
            }
            Ok(status) => {
                warn!(
                    "Removing entry {} from watchlist {} returned {}",
                    entry_id, watchlist_id, status
                );
                false
            }
            Err(e) => {
                self.absorb("Error removing exhibitor from watchlist", e);
                false
            }
        }
    }

    /// Marker click: remove a favorite, or add a non-favorite
    pub async fn toggle_favorite(&mut self, exhibitor_id: &str) -> bool {
        if self.mirror.contains(exhibitor_id) {
            self.remove_favorite(exhibitor_id).await
        } else {
            self.add_favorite(exhibitor_id).await
        }
    }

    /// Let the user switch to another eligible watchlist and reload its entries.
    ///
    /// Returns the new favorite ids, or None if nothing changed.
    pub async fn change_watchlist(&mut self, picker: &dyn WatchlistPicker) -> Option<Vec<String>> {
        if self.is_halted() {
            return None;
        }

        let watchlists = match self.api.list_watchlists(self.label.as_deref()).await {
            Ok(watchlists) => eligible_watchlists(watchlists),
            Err(e) => {
                self.absorb("Error fetching watchlists", e);
                return None;
            }
        };
        if watchlists.is_empty() {
            return None;
        }

        let chosen = match picker.pick(watchlists, self.watchlist_id.clone()).await {
            Ok(id) => id,
            Err(e) => {
                warn!("Watchlist change abandoned: {:#}", e);
                return None;
            }
        };

        self.save_preference(&chosen);
        self.show_change_watchlist = true;
        self.watchlist_id = Some(chosen);
        Some(self.sync_all().await)
    }

    fn load_preference(&self) -> Option<String> {
        self.store.load_watchlist_id().unwrap_or_else(|e| {
            warn!("Failed to read stored watchlist: {:#}", e);
            None
        })
    }

    fn save_preference(&self, watchlist_id: &str) {
        if let Err(e) = self.store.save_watchlist_id(watchlist_id) {
            warn!("Failed to store watchlist choice: {:#}", e);
        }
    }

    fn clear_preference(&self) {
        if let Err(e) = self.store.clear_watchlist_id() {
            warn!("Failed to clear stored watchlist: {:#}", e);
        }
    }
}
