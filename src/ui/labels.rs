use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::metric_label;
use crate::system::metric::Metric;
use crate::system::snapshot::Snapshot;
use crate::ui::theme::Theme;

/// Current value of every metric, one line each.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            " Now ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let lines: Vec<Line> = Metric::ALL
        .into_iter()
        .flat_map(|metric| {
            let color = if snapshot.is_stale(metric) {
                theme.text_stale
            } else {
                theme.text_primary
            };
            [
                Line::from(Span::styled(
                    format!(" {}", metric_label(snapshot, metric)),
                    Style::default().fg(color),
                )),
                Line::default(),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
