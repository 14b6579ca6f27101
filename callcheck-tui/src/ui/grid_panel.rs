//! Panel 1 — Grid: one chart per ticker, scorecard and disclaimer below.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use callcheck_core::render::TickerPanel;
use callcheck_core::TickerState;

use crate::app::AppState;
use crate::theme;
use crate::ui::chart;

const COLUMNS: usize = 2;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(grid) = &app.grid else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(area);

    let rows = grid.panels.len().div_ceil(COLUMNS).max(1);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(chunks[0]);

    for (i, panel) in grid.panels.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
            .split(row_areas[i / COLUMNS]);
        render_cell(f, cols[i % COLUMNS], app, i, panel);
    }

    let footer = vec![
        Line::from(Span::styled(grid.scorecard_text.as_str(), theme::accent_bold())),
        Line::from(Span::styled(grid.disclaimer.as_str(), theme::muted())),
    ];
    f.render_widget(
        Paragraph::new(footer).wrap(Wrap { trim: true }),
        chunks[1],
    );
}

fn render_cell(f: &mut Frame, area: Rect, app: &AppState, index: usize, panel: &TickerPanel) {
    let selected = index == app.selected;
    let marker = if selected { "▶ " } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(selected))
        .title(format!(
            " {marker}{} ({}) ",
            panel.ticker.display_name(),
            panel.ticker.symbol
        ))
        .title_style(theme::panel_title(selected));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &panel.state {
        TickerState::NoData => {
            f.render_widget(
                Paragraph::new(Span::styled("No data yet", theme::muted())),
                inner,
            );
        }
        TickerState::Fault { message } => {
            f.render_widget(
                Paragraph::new(Span::styled(message.as_str(), theme::negative()))
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }
        TickerState::Loaded { .. } => {
            match app.grid_charts.get(index).and_then(|s| s.current()) {
                Some(instance) => chart::render(f, inner, instance, false),
                None => f.render_widget(
                    Paragraph::new(Span::styled("Chart unavailable", theme::warning())),
                    inner,
                ),
            }
        }
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Nothing loaded yet.", theme::muted())),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to load the config and price snapshot, e for errors.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
