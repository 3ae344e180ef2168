use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::i18n::{t, Language};
use crate::model::WatchlistSelector;

const MODAL_WIDTH: u16 = 64;

/// Radio items: "(•) 1. Name" plus an optional dimmed description line
fn build_items(selector: &WatchlistSelector) -> Vec<ListItem<'static>> {
    selector
        .watchlists()
        .iter()
        .enumerate()
        .map(|(idx, watchlist)| {
            let checked = idx == selector.selected_index();
            let radio = if checked { "(•) " } else { "( ) " };
            let mut lines = vec![Line::from(vec![
                Span::styled(radio, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{}. ", idx + 1), Style::default().fg(Color::Yellow)),
                Span::raw(watchlist.name.clone()),
            ])];
            if let Some(description) = watchlist.description.as_deref().filter(|d| !d.is_empty()) {
                lines.push(Line::from(Span::styled(
                    format!("       {}", description),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        })
        .collect()
}

fn hint_line(language: Language, creating: bool) -> Line<'static> {
    let key = Style::default().fg(Color::Yellow);
    if creating {
        Line::from(vec![
            Span::styled("Enter", key),
            Span::raw(format!(":{}  ", t(language, "createButton"))),
            Span::styled("Esc", key),
            Span::raw(format!(":{}", t(language, "cancelButton"))),
        ])
    } else {
        Line::from(vec![
            Span::styled("Enter", key),
            Span::raw(format!(":{}  ", t(language, "selectButton"))),
            Span::styled("n", key),
            Span::raw(format!(":{}  ", t(language, "createNewWatchlist"))),
            Span::styled("Esc", key),
            Span::raw(format!(":{}", t(language, "cancelButton"))),
        ])
    }
}

/// Render the watchlist selection modal
pub fn render_selector(f: &mut Frame, selector: &WatchlistSelector, language: Language) {
    let area = f.area();
    let items = build_items(selector);
    let item_lines: u16 = selector
        .watchlists()
        .iter()
        .map(|w| if w.description.as_deref().is_some_and(|d| !d.is_empty()) { 2 } else { 1 })
        .sum::<u16>()
        .max(1);

    let form_height = if selector.is_creating() { 3 } else { 0 };
    // borders + description + hint
    let modal_height = (item_lines + form_height + 6).min(area.height);
    let modal_width = MODAL_WIDTH.min(area.width);
    let modal_area = Rect {
        x: (area.width.saturating_sub(modal_width)) / 2,
        y: (area.height.saturating_sub(modal_height)) / 2,
        width: modal_width,
        height: modal_height,
    };

    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", t(language, "modalTitle")))
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(form_height),
            Constraint::Length(1),
        ])
        .split(inner);

    let description = Paragraph::new(t(language, "modalDescription"))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    f.render_widget(description, chunks[0]);

    if items.is_empty() {
        let empty = Paragraph::new(t(language, "noWatchlistsFound"))
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, chunks[1]);
    } else {
        let list = List::new(items).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default();
        state.select(Some(selector.selected_index()));
        f.render_stateful_widget(list, chunks[1], &mut state);
    }

    if let Some(input) = selector.create_input() {
        let text = if input.is_empty() {
            Span::styled(
                t(language, "watchlistNamePlaceholder").to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw(input.to_string())
        };
        let form = Paragraph::new(Line::from(vec![text, Span::raw("▏")])).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", t(language, "createNewWatchlist")))
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(form, chunks[2]);
    }

    f.render_widget(
        Paragraph::new(hint_line(language, selector.is_creating())),
        chunks[3],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_hint_line_translated() {
        assert!(text(&hint_line(Language::De, false)).contains("Auswählen"));
        assert!(text(&hint_line(Language::En, true)).contains("Create"));
    }

    #[test]
    fn test_closed_selector_has_no_items() {
        let selector = WatchlistSelector::new();
        assert!(build_items(&selector).is_empty());
    }
}
