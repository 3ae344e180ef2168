//! Keyboard Input Handler
//!
//! Modal layers get the key first: the session-expired notice, then the
//! watchlist selector (and its create form), then the hall plan itself.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::api::WatchlistApi;
use crate::i18n::t;
use crate::logic::errors::{format_error_message, is_expiry};
use crate::logic::watchlists::named_watchlist_request;
use crate::services::sync::SyncCommand;
use crate::{App, SyncStatus};

/// Handle keyboard input
pub async fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.model.ui.should_quit = true;
        return Ok(());
    }

    // Session expired: only reload or quit
    if app.model.ui.session_expired {
        match key.code {
            KeyCode::Enter | KeyCode::Char('r') => {
                app.model.ui.reload_requested = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                app.model.ui.should_quit = true;
            }
            _ => {}
        }
        return Ok(());
    }

    if app.model.ui.selector.is_creating() {
        return handle_create_form_key(app, key).await;
    }

    if app.model.ui.selector.is_open() {
        handle_selector_key(app, key);
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.model.ui.should_quit = true;
        }
        KeyCode::Up | KeyCode::Char('k') => app.model.hallplan.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.model.hallplan.select_next(),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('f') => {
            // Marker click on the selected exhibitor
            let Some(exhibitor) = app.model.hallplan.selected_exhibitor() else {
                return Ok(());
            };
            let exhibitor_id = exhibitor.id.clone();
            if app.model.hallplan.sync_status != SyncStatus::Ready {
                debug!("Ignoring marker click on {}, favorites not synced", exhibitor_id);
                let text = t(app.model.ui.language, "favoritesUnavailable").to_string();
                app.model.ui.show_toast(text);
                return Ok(());
            }
            app.send(SyncCommand::MarkerClicked(exhibitor_id));
        }
        KeyCode::Char('w') if app.model.ui.show_change_watchlist => {
            app.send(SyncCommand::ChangeWatchlist);
        }
        KeyCode::Char('r') => {
            app.send(SyncCommand::Resync);
        }
        _ => {}
    }

    Ok(())
}

/// Keys while the selector is open: navigation moves the radio, Enter,
/// Space or a digit confirm, cancel/overlay/Esc dismiss with the current one
fn handle_selector_key(app: &mut App, key: KeyEvent) {
    let selector = &mut app.model.ui.selector;

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => selector.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => selector.select_next(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            selector.activate_selected();
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            selector.activate_digit(c);
        }
        KeyCode::Char('n') => selector.toggle_create_form(),
        KeyCode::Char('c') | KeyCode::Char('q') | KeyCode::Esc => {
            selector.dismiss();
        }
        _ => {}
    }
}

async fn handle_create_form_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.model.ui.selector.cancel_create_form(),
        KeyCode::Backspace => app.model.ui.selector.pop_char(),
        KeyCode::Enter => {
            let client = app.client.clone();
            let created = app
                .model
                .ui
                .selector
                .submit_new_watchlist(|name| async move {
                    client.create_watchlist(&named_watchlist_request(&name)).await
                })
                .await;

            match created {
                Ok(Some(watchlist_id)) => {
                    debug!("Created and selected watchlist {}", watchlist_id);
                }
                Ok(None) => {}
                Err(e) if is_expiry(&e) => {
                    // The sync service owns expiry; its notice blocks the UI
                    app.model.ui.selector.abandon();
                    app.send(SyncCommand::SessionExpired);
                }
                Err(e) => {
                    let label = t(app.model.ui.language, "createNewWatchlist");
                    let message = format!("Error: {}: {}", label, format_error_message(&e));
                    app.model.ui.show_toast(message);
                }
            }
        }
        KeyCode::Char(c) => app.model.ui.selector.push_char(c),
        _ => {}
    }

    Ok(())
}
