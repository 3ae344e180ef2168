use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::i18n::{t, Language};

/// Render the blocking "session expired" notice
pub fn render_session_expired(f: &mut Frame, language: Language) {
    let area = f.area();
    let prompt_width = 50.min(area.width);
    let prompt_height = 7.min(area.height);
    let prompt_area = Rect {
        x: (area.width.saturating_sub(prompt_width)) / 2,
        y: (area.height.saturating_sub(prompt_height)) / 2,
        width: prompt_width,
        height: prompt_height,
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            t(language, "sessionExpired"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(":Reload  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(":Quit"),
        ]),
    ];

    let prompt = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}
