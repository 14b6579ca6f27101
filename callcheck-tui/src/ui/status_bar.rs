//! Bottom status bar — panel hints, as-of date, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use callcheck_core::render::as_of_text;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(" 1:Grid 2:Detail 3:Help r:Reload", theme::muted()));
    spans.push(Span::raw(" | "));

    if let Some(grid) = &app.grid {
        spans.push(Span::styled(as_of_text(grid.as_of), theme::accent()));
        if app.stale {
            spans.push(Span::styled(" (stale)", theme::warning()));
        }
        spans.push(Span::raw(" | "));
    }

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
