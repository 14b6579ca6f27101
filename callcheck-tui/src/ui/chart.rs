//! Line chart of one installed chart instance, with its call lines.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType};
use ratatui::Frame;

use callcheck_core::format;

use crate::chart_slot::ChartInstance;
use crate::theme;

/// `show_legend` is off for the small grid cells.
pub fn render(f: &mut Frame, area: Rect, chart: &ChartInstance, show_legend: bool) {
    let mut datasets = Vec::with_capacity(chart.lines.len() + 1);
    datasets.push(
        Dataset::default()
            .name(chart.title.clone())
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::hex_or_accent(&chart.color)))
            .graph_type(GraphType::Line)
            .data(&chart.points),
    );
    for (line, segment) in &chart.lines {
        datasets.push(
            Dataset::default()
                .name(line.label.clone())
                .marker(symbols::Marker::Dot)
                .style(Style::default().fg(theme::hex_or_accent(&line.color)))
                .graph_type(GraphType::Line)
                .data(segment),
        );
    }

    let x_labels = match (chart.first_date, chart.last_date) {
        (Some(first), Some(last)) => vec![
            Span::styled(format::short_date(first), theme::muted()),
            Span::styled(format::short_date(last), theme::muted()),
        ],
        _ => Vec::new(),
    };
    let [y_min, y_max] = chart.y_bounds;

    let mut widget = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds(chart.x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds(chart.y_bounds)
                .labels(vec![
                    Span::styled(format::usd(y_min), theme::muted()),
                    Span::styled(format::usd(y_max), theme::muted()),
                ]),
        );
    if !show_legend {
        widget = widget.legend_position(None);
    }

    f.render_widget(widget, area);
}
