//! Panel 3 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-3", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "r", "Reload config and price snapshot");
    key(&mut lines, "e", "Open error history");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Grid");
    key(&mut lines, "j / k", "Select next / previous ticker");
    key(&mut lines, "Enter", "Open the selected ticker");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Detail");
    key(&mut lines, "j / k", "Next / previous ticker");
    key(&mut lines, "Esc", "Back to the grid");
    lines.push(Line::from(""));

    section(&mut lines, "Sources");
    key(&mut lines, "config", &app.config_source.to_string());
    key(&mut lines, "prices", &app.prices_source.to_string());
    if let Some(fp) = &app.fingerprint {
        key(&mut lines, "grid fingerprint", fp.short());
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
