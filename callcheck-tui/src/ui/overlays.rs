//! Error history overlay.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(" Errors ({}) — Esc to close ", app.error_history.len()))
        .title_style(theme::accent_bold());

    let lines: Vec<Line> = if app.error_history.is_empty() {
        vec![Line::from(Span::styled("No errors.", theme::muted()))]
    } else {
        app.error_history
            .iter()
            .skip(app.error_scroll)
            .map(|e| {
                Line::from(vec![
                    Span::styled(e.timestamp.format("%H:%M:%S ").to_string(), theme::muted()),
                    Span::styled(format!("[{}] ", e.context), theme::warning()),
                    Span::styled(e.message.as_str(), theme::text()),
                ])
            })
            .collect()
    };

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}
