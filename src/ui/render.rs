use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::{dialogs, exhibitor_list, selector, status_bar, toast};
use crate::i18n::t;
use crate::model::Model;
use crate::SyncStatus;

/// Main render function - draws the hall plan, then any modal on top
pub fn render(f: &mut Frame, model: &Model) {
    let size = f.area();
    let language = model.ui.language;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(size);

    let title = if model.hallplan.sync_status == SyncStatus::Loading {
        format!("{} · {}", t(language, "favoritesTitle"), t(language, "loadingWatchlists"))
    } else {
        t(language, "favoritesTitle").to_string()
    };
    exhibitor_list::render_exhibitor_list(f, chunks[0], &model.hallplan, &title);

    status_bar::render_status_bar(
        f,
        chunks[1],
        &model.hallplan.sync_status,
        model.ui.show_change_watchlist,
        t(language, "settingsTooltip"),
    );

    if model.ui.selector.is_open() {
        selector::render_selector(f, &model.ui.selector, language);
    }

    if model.ui.session_expired {
        dialogs::render_session_expired(f, language);
    }

    if let Some((message, _timestamp)) = &model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
