use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::system::snapshot::Snapshot;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    theme: &Theme,
    interval_ms: u64,
    history_capacity: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let secondary = Style::default().fg(theme.text_secondary);
    let mut spans = vec![
        Span::styled(
            " System Monitor ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("Every {interval_ms} ms"), secondary),
        Span::raw("  "),
        Span::styled(format!("Tick {}", snapshot.tick()), secondary),
        Span::raw("  "),
        Span::styled(format!("History {history_capacity}"), secondary),
    ];

    if snapshot.dropped_ticks() > 0 {
        spans.extend([
            Span::raw("  "),
            Span::styled(
                format!("Dropped {}", snapshot.dropped_ticks()),
                Style::default().fg(theme.text_stale),
            ),
        ]);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
