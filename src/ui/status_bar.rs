use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::SyncStatus;

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(show_change_watchlist: bool, change_label: &str) -> Vec<Span<'static>> {
    let mut hotkey_spans = vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(":Nav  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(":Favorite  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(":Resync  "),
    ];

    if show_change_watchlist {
        hotkey_spans.extend(vec![
            Span::styled("w", Style::default().fg(Color::Yellow)),
            Span::raw(format!(":{}  ", change_label)),
        ]);
    }

    hotkey_spans.extend(vec![
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(":Quit"),
    ]);

    hotkey_spans
}

fn status_color(status: &SyncStatus) -> Color {
    match status {
        SyncStatus::Loading => Color::Yellow,
        SyncStatus::Ready => Color::Green,
        SyncStatus::Unavailable => Color::Gray,
        SyncStatus::Expired => Color::Red,
    }
}

/// Render the bottom status bar: sync state plus hotkey legend
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    status: &SyncStatus,
    show_change_watchlist: bool,
    change_label: &str,
) {
    let mut spans = vec![
        Span::styled(
            format!("● {}", status.as_str()),
            Style::default().fg(status_color(status)),
        ),
        Span::raw(" │ "),
    ];
    spans.extend(build_hotkey_spans(show_change_watchlist, change_label));

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(bar, area);
}
