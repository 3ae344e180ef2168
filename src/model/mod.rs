//! Application Model
//!
//! The state the hall plan renders from, split into focused sub-models:
//!
//! - **HallplanModel**: Exhibitors, favorites, selection, sync status
//! - **UiModel**: Language, watchlist selector, notices, toasts
//!
//! No services live here; all I/O goes through the sync service channels.

pub mod hallplan;
pub mod selector;
pub mod ui;

pub use hallplan::{Exhibitor, HallplanModel};
pub use selector::WatchlistSelector;
pub use ui::UiModel;

use crate::i18n::Language;

/// Root application model composed of focused sub-models
#[derive(Debug)]
pub struct Model {
    pub hallplan: HallplanModel,
    pub ui: UiModel,
}

impl Model {
    pub fn new(exhibitors: Vec<Exhibitor>, seed_favorites: Vec<String>, language: Language) -> Self {
        Self {
            hallplan: HallplanModel::new(exhibitors, seed_favorites),
            ui: UiModel::new(language),
        }
    }

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }
}
