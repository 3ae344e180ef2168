//! Watchlist selector modal state
//!
//! A single-slot mailbox: at most one [`SelectionRequest`] is pending at a
//! time. Every way of closing the modal with items present answers the
//! request with a real watchlist id.

use std::future::Future;

use anyhow::Result;
use tracing::{debug, warn};

use crate::api::Watchlist;
use crate::logic::errors::SelectorBusy;
use crate::logic::navigation::{digit_to_index, next_selection, prev_selection};
use crate::services::sync::SelectionRequest;

/// Max length of a new watchlist's name
pub const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Default)]
pub struct WatchlistSelector {
    pending: Option<SelectionRequest>,
    /// Index of the checked radio item
    selected: usize,
    /// Name typed into the create-new form, when the form is open
    create_input: Option<String>,
}

impl WatchlistSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Open the modal for a request.
    ///
    /// A second request while one is pending is rejected; dropping it closes
    /// its reply channel so the requester is not left waiting.
    pub fn show(&mut self, request: SelectionRequest) -> Result<(), SelectorBusy> {
        if self.pending.is_some() {
            warn!("Rejecting watchlist selection: another one is pending");
            return Err(SelectorBusy);
        }

        self.selected = request
            .preselected
            .as_deref()
            .and_then(|id| request.watchlists.iter().position(|w| w.id == id))
            .unwrap_or(0);
        self.create_input = None;
        self.pending = Some(request);
        Ok(())
    }

    pub fn watchlists(&self) -> &[Watchlist] {
        self.pending
            .as_ref()
            .map(|r| r.watchlists.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.watchlists().get(self.selected).map(|w| w.id.as_str())
    }

    /// Move the radio selection without confirming
    pub fn select_next(&mut self) {
        if let Some(idx) = next_selection(Some(self.selected), self.watchlists().len()) {
            self.selected = idx;
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(idx) = prev_selection(Some(self.selected), self.watchlists().len()) {
            self.selected = idx;
        }
    }

    /// Confirm the item at `index`; confirm-on-click, no separate OK step
    pub fn activate(&mut self, index: usize) -> Option<String> {
        let id = self.watchlists().get(index)?.id.clone();
        self.selected = index;
        self.resolve(id)
    }

    pub fn activate_selected(&mut self) -> Option<String> {
        self.activate(self.selected)
    }

    /// Confirm by digit key ('1' = first item)
    pub fn activate_digit(&mut self, c: char) -> Option<String> {
        let index = digit_to_index(c, self.watchlists().len())?;
        self.activate(index)
    }

    /// Cancel / overlay / Escape: answer with whatever is currently selected
    pub fn dismiss(&mut self) -> Option<String> {
        let current = self.selected_id().map(str::to_string);
        match current {
            Some(id) => self.resolve(id),
            None => {
                // Nothing to choose from; dropping the request errors the requester
                self.close();
                None
            }
        }
    }

    fn resolve(&mut self, watchlist_id: String) -> Option<String> {
        let request = self.pending.take()?;
        debug!("Watchlist {} selected", watchlist_id);
        let _ = request.reply.send(watchlist_id.clone());
        self.close();
        Some(watchlist_id)
    }

    /// Close without answering; the requester sees a dropped channel
    pub fn abandon(&mut self) {
        if self.pending.is_some() {
            debug!("Watchlist selection abandoned");
        }
        self.close();
    }

    fn close(&mut self) {
        self.pending = None;
        self.selected = 0;
        self.create_input = None;
    }

    // ============================================
    // CREATE-NEW FORM
    // ============================================

    pub fn is_creating(&self) -> bool {
        self.create_input.is_some()
    }

    pub fn create_input(&self) -> Option<&str> {
        self.create_input.as_deref()
    }

    /// Toggle the create-new form; closing it discards the typed name
    pub fn toggle_create_form(&mut self) {
        if !self.is_open() {
            return;
        }
        self.create_input = match self.create_input {
            Some(_) => None,
            None => Some(String::new()),
        };
    }

    pub fn cancel_create_form(&mut self) {
        self.create_input = None;
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(input) = self.create_input.as_mut() {
            if input.chars().count() < MAX_NAME_LEN {
                input.push(c);
            }
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(input) = self.create_input.as_mut() {
            input.pop();
        }
    }

    /// Submit the create-new form through an external creation callback.
    ///
    /// A blank name does nothing. If the callback yields an id it is treated
    /// exactly like a selection; on error the form stays open.
    pub async fn submit_new_watchlist<F, Fut>(&mut self, create: F) -> Result<Option<String>>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let name = match self.create_input.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Ok(None),
        };

        let watchlist_id = create(name).await?;
        Ok(self.resolve(watchlist_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    fn watchlist(id: &str) -> Watchlist {
        Watchlist {
            id: id.to_string(),
            name: format!("List {}", id),
            description: None,
            actions: vec!["addEntry".to_string(), "removeEntry".to_string()],
            labels: None,
        }
    }

    fn request(ids: &[&str], preselected: Option<&str>) -> (SelectionRequest, oneshot::Receiver<String>) {
        let (reply, answer) = oneshot::channel();
        (
            SelectionRequest {
                watchlists: ids.iter().map(|id| watchlist(id)).collect(),
                preselected: preselected.map(str::to_string),
                reply,
            },
            answer,
        )
    }

    #[test]
    fn test_show_preselects_first_by_default() {
        let mut selector = WatchlistSelector::new();
        let (req, _answer) = request(&["a", "b"], None);
        selector.show(req).unwrap();
        assert!(selector.is_open());
        assert_eq!(selector.selected_id(), Some("a"));
    }

    #[test]
    fn test_show_preselects_given_id() {
        let mut selector = WatchlistSelector::new();
        let (req, _answer) = request(&["a", "b", "c"], Some("c"));
        selector.show(req).unwrap();
        assert_eq!(selector.selected_index(), 2);
    }

    #[test]
    fn test_unknown_preselection_falls_back_to_first() {
        let mut selector = WatchlistSelector::new();
        let (req, _answer) = request(&["a", "b"], Some("gone"));
        selector.show(req).unwrap();
        assert_eq!(selector.selected_id(), Some("a"));
    }

    #[test]
    fn test_activate_resolves_and_closes() {
        let mut selector = WatchlistSelector::new();
        let (req, mut answer) = request(&["a", "b"], None);
        selector.show(req).unwrap();

        assert_eq!(selector.activate(1).as_deref(), Some("b"));
        assert!(!selector.is_open());
        assert_eq!(answer.try_recv().unwrap(), "b");
    }

    #[test]
    fn test_navigation_does_not_resolve() {
        let mut selector = WatchlistSelector::new();
        let (req, mut answer) = request(&["a", "b"], None);
        selector.show(req).unwrap();

        selector.select_next();
        assert!(selector.is_open());
        assert!(answer.try_recv().is_err());
        assert_eq!(selector.selected_id(), Some("b"));
        selector.select_next();
        assert_eq!(selector.selected_id(), Some("a"));
        selector.select_previous();
        assert_eq!(selector.selected_id(), Some("b"));
    }

    #[test]
    fn test_second_show_is_rejected_and_first_survives() {
        let mut selector = WatchlistSelector::new();
        let (first, mut first_answer) = request(&["a", "b"], None);
        let (second, mut second_answer) = request(&["x", "y"], None);

        selector.show(first).unwrap();
        assert_eq!(selector.show(second), Err(SelectorBusy));

        // Rejected request's reply was dropped
        assert!(matches!(
            second_answer.try_recv(),
            Err(oneshot::error::TryRecvError::Closed)
        ));

        assert_eq!(selector.activate_selected().as_deref(), Some("a"));
        assert_eq!(first_answer.try_recv().unwrap(), "a");
    }

    #[test]
    fn test_create_form_input() {
        let mut selector = WatchlistSelector::new();
        let (req, _answer) = request(&["a", "b"], None);
        selector.show(req).unwrap();

        selector.toggle_create_form();
        assert!(selector.is_creating());
        for c in "Messe".chars() {
            selector.push_char(c);
        }
        selector.pop_char();
        assert_eq!(selector.create_input(), Some("Mess"));

        selector.toggle_create_form();
        assert!(!selector.is_creating());
        assert_eq!(selector.create_input(), None);
    }

    #[test]
    fn test_create_input_is_capped() {
        let mut selector = WatchlistSelector::new();
        let (req, _answer) = request(&["a"], None);
        selector.show(req).unwrap();
        selector.toggle_create_form();
        for _ in 0..(MAX_NAME_LEN + 20) {
            selector.push_char('x');
        }
        assert_eq!(selector.create_input().map(|s| s.len()), Some(MAX_NAME_LEN));
    }

    #[test]
    fn test_abandon_drops_request() {
        let mut selector = WatchlistSelector::new();
        let (req, mut answer) = request(&["a", "b"], None);
        selector.show(req).unwrap();
        selector.toggle_create_form();

        selector.abandon();

        assert!(!selector.is_open());
        assert!(!selector.is_creating());
        assert!(matches!(
            answer.try_recv(),
            Err(oneshot::error::TryRecvError::Closed)
        ));
    }

    #[test]
    fn test_create_form_requires_open_modal() {
        let mut selector = WatchlistSelector::new();
        selector.toggle_create_form();
        assert!(!selector.is_creating());
    }
}
