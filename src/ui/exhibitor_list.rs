use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::model::HallplanModel;

const FAVORITE_ICON: &str = "★ ";
const PLAIN_ICON: &str = "☆ ";

/// Pad `name` with spaces to `width` display columns (no truncation)
fn pad_to_width(name: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(name);
    format!("{}{}", name, " ".repeat(width.saturating_sub(used)))
}

/// Render the exhibitor list: one marker per exhibitor, favorites starred
pub fn render_exhibitor_list(f: &mut Frame, area: Rect, hallplan: &HallplanModel, title: &str) {
    let name_width = hallplan
        .exhibitors
        .iter()
        .map(|e| UnicodeWidthStr::width(e.name.as_str()))
        .max()
        .unwrap_or(0)
        .min(area.width.saturating_sub(20) as usize);

    let items: Vec<ListItem> = hallplan
        .exhibitors
        .iter()
        .map(|exhibitor| {
            let is_favorite = hallplan.is_favorite(&exhibitor.id);
            let (icon, icon_style) = if is_favorite {
                (FAVORITE_ICON, Style::default().fg(Color::Yellow))
            } else {
                (PLAIN_ICON, Style::default().fg(Color::DarkGray))
            };

            ListItem::new(Line::from(vec![
                Span::styled(icon, icon_style),
                Span::raw(pad_to_width(&exhibitor.name, name_width)),
                Span::styled(
                    format!("  {}", exhibitor.location()),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let title = format!(
        " {} ({} {}) ",
        title,
        hallplan.favorite_count(),
        FAVORITE_ICON.trim_end()
    );

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

    let mut state = ListState::default();
    state.select(hallplan.selected);
    f.render_stateful_widget(list, area, &mut state);
}
