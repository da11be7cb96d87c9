use std::path::Path;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Sparkline};

use crate::system::metric::Metric;
use crate::system::snapshot::Snapshot;
use crate::ui::theme::Theme;

// Sparkline data is integral; percentages are scaled to keep two decimals.
const PERCENT_SCALE: f64 = 100.0;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    theme: &Theme,
    disk_path: &Path,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Min(3),
        ])
        .split(area);

    render_history(
        frame,
        chunks[0],
        snapshot,
        Metric::Cpu,
        " CPU Usage Over Time ",
        theme.cpu_color,
        theme,
    );
    render_history(
        frame,
        chunks[1],
        snapshot,
        Metric::Ram,
        " RAM Usage Over Time ",
        theme.ram_color,
        theme,
    );
    render_disk_gauge(frame, chunks[2], snapshot, theme, disk_path);
}

fn titled_block<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ))
}

/// Scales percentage history for a sparkline with a fixed 0..=100 axis.
pub fn sparkline_data(history: &[f64]) -> Vec<u64> {
    history
        .iter()
        .map(|v| (v.clamp(0.0, 100.0) * PERCENT_SCALE).round() as u64)
        .collect()
}

fn render_history(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    metric: Metric,
    title: &str,
    color: Color,
    theme: &Theme,
) {
    let data = sparkline_data(snapshot.history(metric));
    let sparkline = Sparkline::default()
        .block(titled_block(title.to_string(), theme))
        .data(&data)
        .max((100.0 * PERCENT_SCALE) as u64)
        .style(Style::default().fg(color));

    frame.render_widget(sparkline, area);
}

fn render_disk_gauge(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    theme: &Theme,
    disk_path: &Path,
) {
    let percent = snapshot.latest(Metric::Disk).clamp(0.0, 100.0);
    let title = format!(" Disk Usage ({}) ", disk_path.display());

    let gauge = Gauge::default()
        .block(titled_block(title, theme))
        .gauge_style(
            Style::default()
                .fg(theme.gauge_filled)
                .bg(theme.gauge_unfilled),
        )
        .ratio(percent / 100.0)
        .label(format!("{percent:.2}%"));

    frame.render_widget(gauge, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_data_scales_and_clamps() {
        assert_eq!(
            sparkline_data(&[0.0, 12.34, 100.0, 150.0, -3.0]),
            vec![0, 1234, 10000, 10000, 0]
        );
    }
}
