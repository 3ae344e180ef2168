//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! language, the watchlist selector, notices and toasts.

use std::time::Instant;

use super::selector::WatchlistSelector;
use crate::i18n::Language;

/// How long a toast stays visible
pub const TOAST_DURATION_MS: u128 = 1500;

#[derive(Debug)]
pub struct UiModel {
    pub language: Language,

    // ============================================
    // DIALOGS & POPUPS
    // ============================================
    /// Watchlist selection modal
    pub selector: WatchlistSelector,

    /// Blocking "session expired" notice; only reload or quit get past it
    pub session_expired: bool,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    // ============================================
    // AFFORDANCES
    // ============================================
    /// Whether the "change watchlist" key is offered
    pub show_change_watchlist: bool,

    /// Set by the reload action; consumed by the main loop
    pub reload_requested: bool,

    pub should_quit: bool,
}

impl UiModel {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            selector: WatchlistSelector::new(),
            session_expired: false,
            toast_message: None,
            show_change_watchlist: false,
            reload_requested: false,
            should_quit: false,
        }
    }

    /// Check if any modal dialog is currently showing
    pub fn has_modal(&self) -> bool {
        self.session_expired || self.selector.is_open()
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        match &self.toast_message {
            Some((_, timestamp)) => timestamp.elapsed().as_millis() >= TOAST_DURATION_MS,
            None => false,
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_model_creation() {
        let model = UiModel::new(Language::En);
        assert!(!model.has_modal());
        assert!(!model.show_change_watchlist);
        assert!(!model.should_quit);
    }

    #[test]
    fn test_expired_notice_is_modal() {
        let mut model = UiModel::new(Language::De);
        model.session_expired = true;
        assert!(model.has_modal());
    }

    #[test]
    fn test_toast() {
        let mut model = UiModel::new(Language::En);
        model.show_toast("Saved".to_string());
        assert!(model.toast_message.is_some());
        assert!(!model.should_dismiss_toast());

        model.dismiss_toast();
        assert!(model.toast_message.is_none());
        assert!(!model.should_dismiss_toast());
    }
}
