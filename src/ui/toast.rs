use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render a toast notification (brief pop-up message)
pub fn render_toast(f: &mut Frame, area: Rect, message: &str) {
    let max_width = (area.width as usize).min(80);
    let toast_width = (UnicodeWidthStr::width(message) + 6).min(max_width) as u16;
    let toast_height = 4;

    let toast_area = Rect {
        x: area.x + (area.width.saturating_sub(toast_width)) / 2,
        y: area.y + 3,
        width: toast_width,
        height: toast_height.min(area.height.saturating_sub(3)),
    };

    f.render_widget(Clear, toast_area);

    let is_error = message.starts_with("Error:");
    let (icon, color) = if is_error {
        ("✗ ", Color::Red)
    } else {
        ("ℹ ", Color::Cyan)
    };

    let toast_line = Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(message),
    ]);

    let toast_text = Paragraph::new(vec![toast_line])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(toast_text, toast_area);
}
