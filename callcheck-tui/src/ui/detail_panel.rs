//! Panel 2 — Detail: selected ticker's chart, verdict banners, projections.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use callcheck_core::{DetailView, TickerState};

use crate::app::AppState;
use crate::theme;
use crate::ui::chart;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(view) = &app.detail else {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Select a ticker on the grid (press 1) and press Enter.",
                theme::muted(),
            )),
            area,
        );
        return;
    };

    let text = text_lines(view);
    let text_height = (text.len() as u16 + 1).min(area.height / 2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(text_height)])
        .split(area);

    match (&view.state, app.detail_chart.current()) {
        (TickerState::Loaded { .. }, Some(instance)) => chart::render(f, chunks[0], instance, true),
        (TickerState::Fault { message }, _) => f.render_widget(
            Paragraph::new(Span::styled(message.as_str(), theme::negative()))
                .wrap(Wrap { trim: true }),
            chunks[0],
        ),
        _ => f.render_widget(
            Paragraph::new(Span::styled(
                format!("{}: no data yet", view.ticker.symbol),
                theme::muted(),
            )),
            chunks[0],
        ),
    }

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), chunks[1]);
}

fn text_lines(view: &DetailView) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for banner in &view.banners {
        let style = Style::default().fg(theme::direction_color(banner.direction));
        let mut spans = vec![
            Span::styled("■ ", Style::default().fg(theme::hex_or_accent(&banner.color))),
            Span::styled(banner.text.as_str(), style),
        ];
        if !banner.url.is_empty() {
            spans.push(Span::styled(format!("  {}", banner.url), theme::muted()));
        }
        lines.push(Line::from(spans));
    }
    for p in &view.projections {
        lines.push(Line::from(Span::styled(p.text.as_str(), theme::text())));
    }
    for note in &view.notes {
        lines.push(Line::from(Span::styled(note.as_str(), theme::warning())));
    }
    if !view.disclaimer.is_empty() {
        lines.push(Line::from(Span::styled(view.disclaimer.as_str(), theme::muted())));
    }
    lines
}
