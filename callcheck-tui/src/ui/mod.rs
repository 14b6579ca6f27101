//! Top-level UI layout — active panel with a one-line status bar.

pub mod chart;
pub mod detail_panel;
pub mod grid_panel;
pub mod help_panel;
pub mod overlays;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    if app.overlay == Overlay::ErrorHistory {
        overlays::render_error_history(f, main_area, app);
    }
}

fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;
    let mut title = format!(" {} [{}] ", panel.label(), panel.index() + 1);
    if app.stale {
        title.push_str("(stale) ");
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(!app.stale))
        .title(title)
        .title_style(theme::panel_title(!app.stale));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Grid => grid_panel::render(f, inner, app),
        Panel::Detail => detail_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
