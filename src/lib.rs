//! Hall plan favorites library
//!
//! Keeps an exhibition hall plan's favorite exhibitors in sync with a remote
//! watchlist API. The terminal front-end in `main.rs` is a thin shell over
//! these modules; everything here is usable (and tested) without a terminal.

pub mod api;
pub mod app;
pub mod config;
pub mod handlers;
pub mod i18n;
pub mod logic;
pub mod model;
pub mod services;
pub mod ui;

pub use app::{App, AppOptions};

/// Connection/sync phase shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Loading,                 // Waiting for the first InitFavorites
    Ready,                   // Watchlist resolved and favorites loaded
    Unavailable,             // No token, or no watchlist could be resolved
    Expired,                 // Session token expired, waiting for reload
}

impl SyncStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SyncStatus::Loading => "Loading",
            SyncStatus::Ready => "Synced",
            SyncStatus::Unavailable => "Offline",
            SyncStatus::Expired => "Expired",
        }
    }
}
