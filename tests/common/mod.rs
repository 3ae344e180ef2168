//! Scripted in-memory watchlist API and picker shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::StatusCode;

use hallfav::api::{EntryPage, FavoriteEntry, NewWatchlist, Watchlist, WatchlistApi};
use hallfav::config::Session;
use hallfav::logic::errors::SessionExpired;
use hallfav::services::favorites::WatchlistPicker;

pub fn session() -> Session {
    Session {
        token: Some("test-token".to_string()),
        app_id: "7648562".to_string(),
        api_base_url: "http://localhost".to_string(),
    }
}

pub fn anonymous_session() -> Session {
    Session {
        token: None,
        ..session()
    }
}

/// A watchlist the session may add to and remove from
pub fn eligible(id: &str) -> Watchlist {
    Watchlist {
        id: id.to_string(),
        name: format!("List {}", id),
        description: None,
        actions: vec!["addEntry".to_string(), "removeEntry".to_string()],
        labels: None,
    }
}

/// A read-only watchlist
pub fn read_only(id: &str) -> Watchlist {
    Watchlist {
        actions: vec!["addEntry".to_string()],
        ..eligible(id)
    }
}

pub fn organization_entries(count: usize) -> Vec<FavoriteEntry> {
    (0..count)
        .map(|i| FavoriteEntry::organization(format!("entry-{}", i), format!("ex-{}", i)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListWatchlists,
    WatchlistExists(String),
    CreateWatchlist(String),
    ListEntries { watchlist_id: String, offset: u64 },
    AddEntry { watchlist_id: String, exhibitor_id: String },
    RemoveEntry { watchlist_id: String, entry_id: String },
}

#[derive(Default)]
struct State {
    watchlists: Vec<Watchlist>,
    existing: HashSet<String>,
    entries: HashMap<String, Vec<FavoriteEntry>>,
    expired: bool,
    fail_entries_at: Option<u64>,
    remove_status: Option<StatusCode>,
    created: usize,
    next_entry: usize,
    calls: Vec<Call>,
}

/// Cloneable handle; clones share the same scripted state and call log
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<State>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_watchlists(self, watchlists: Vec<Watchlist>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for w in &watchlists {
                state.existing.insert(w.id.clone());
            }
            state.watchlists = watchlists;
        }
        self
    }

    pub fn with_entries(self, watchlist_id: &str, entries: Vec<FavoriteEntry>) -> Self {
        self.state
            .lock()
            .unwrap()
            .entries
            .insert(watchlist_id.to_string(), entries);
        self
    }

    pub fn expire(&self) {
        self.state.lock().unwrap().expired = true;
    }

    pub fn fail_entries_at(&self, offset: u64) {
        self.state.lock().unwrap().fail_entries_at = Some(offset);
    }

    pub fn set_remove_status(&self, status: StatusCode) {
        self.state.lock().unwrap().remove_status = Some(status);
    }

    pub fn forget_watchlist(&self, watchlist_id: &str) {
        self.state.lock().unwrap().existing.remove(watchlist_id);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn entry_offsets(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ListEntries { offset, .. } => Some(offset),
                _ => None,
            })
            .collect()
    }

    /// Record a call; fails with the expiry sentinel error once expired
    fn record(&self, call: Call) -> Result<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.expired {
            return Err(SessionExpired.into());
        }
        Ok(state)
    }
}

#[async_trait]
impl WatchlistApi for FakeApi {
    async fn list_watchlists(&self, _label: Option<&str>) -> Result<Vec<Watchlist>> {
        let state = self.record(Call::ListWatchlists)?;
        Ok(state.watchlists.clone())
    }

    async fn watchlist_exists(&self, watchlist_id: &str) -> Result<bool> {
        let state = self.record(Call::WatchlistExists(watchlist_id.to_string()))?;
        Ok(state.existing.contains(watchlist_id))
    }

    async fn create_watchlist(&self, request: &NewWatchlist) -> Result<String> {
        let mut state = self.record(Call::CreateWatchlist(request.name.clone()))?;
        state.created += 1;
        let id = format!("created-{}", state.created);
        state.existing.insert(id.clone());
        Ok(id)
    }

    async fn list_entries(&self, watchlist_id: &str, offset: u64, limit: u64) -> Result<EntryPage> {
        let state = self.record(Call::ListEntries {
            watchlist_id: watchlist_id.to_string(),
            offset,
        })?;
        if state.fail_entries_at == Some(offset) {
            return Err(anyhow!("HTTP 500 Internal Server Error"));
        }

        let all = state.entries.get(watchlist_id).cloned().unwrap_or_default();
        let items: Vec<FavoriteEntry> = all
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        let next_offset = offset + items.len() as u64;
        Ok(EntryPage {
            items,
            total_count: Some(all.len() as u64),
            next_offset,
        })
    }

    async fn add_entry(&self, watchlist_id: &str, exhibitor_id: &str) -> Result<FavoriteEntry> {
        let mut state = self.record(Call::AddEntry {
            watchlist_id: watchlist_id.to_string(),
            exhibitor_id: exhibitor_id.to_string(),
        })?;
        state.next_entry += 1;
        let entry = FavoriteEntry::organization(format!("added-{}", state.next_entry), exhibitor_id);
        state
            .entries
            .entry(watchlist_id.to_string())
            .or_default()
            .push(entry.clone());
        Ok(entry)
    }

    async fn remove_entry(&self, watchlist_id: &str, entry_id: &str) -> Result<StatusCode> {
        let mut state = self.record(Call::RemoveEntry {
            watchlist_id: watchlist_id.to_string(),
            entry_id: entry_id.to_string(),
        })?;
        let status = state.remove_status.unwrap_or(StatusCode::NO_CONTENT);
        if status == StatusCode::NO_CONTENT {
            if let Some(entries) = state.entries.get_mut(watchlist_id) {
                entries.retain(|e| e.id != entry_id);
            }
        }
        Ok(status)
    }
}

/// Picker that answers with a fixed id (or fails when `None`)
pub struct ScriptedPicker {
    answer: Option<String>,
    offered: Mutex<Vec<(Vec<String>, Option<String>)>>,
}

impl ScriptedPicker {
    pub fn answering(id: &str) -> Self {
        Self {
            answer: Some(id.to_string()),
            offered: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            offered: Mutex::new(Vec::new()),
        }
    }

    pub fn times_called(&self) -> usize {
        self.offered.lock().unwrap().len()
    }

    /// (offered ids, preselected id) for every call
    pub fn offered(&self) -> Vec<(Vec<String>, Option<String>)> {
        self.offered.lock().unwrap().clone()
    }
}

#[async_trait]
impl WatchlistPicker for ScriptedPicker {
    async fn pick(&self, watchlists: Vec<Watchlist>, preselected: Option<String>) -> Result<String> {
        self.offered
            .lock()
            .unwrap()
            .push((watchlists.into_iter().map(|w| w.id).collect(), preselected));
        self.answer
            .clone()
            .ok_or_else(|| anyhow!("selector closed"))
    }
}
