//! External Services
//!
//! This module contains services that interact with external systems:
//! - favorites: Watchlist resolution, pagination and add/remove against the API
//! - preferences: Persisted watchlist choice (SQLite)
//! - sync: Background worker wiring the hall plan to the favorites sync

pub mod favorites;
pub mod preferences;
pub mod sync;

pub use favorites::{FavoritesSync, WatchlistPicker};
pub use preferences::{PreferenceDb, PreferenceStore};
pub use sync::{spawn_sync_service, SelectionRequest, SyncCommand, SyncNotice};
