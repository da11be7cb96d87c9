use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::app::App;

const WIDTH: u16 = 44;

/// Keybinds plus the sampler settings in effect, drawn over the dashboard.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let entries = app.help_entries();
    let notes = [
        format!("Sampling every {} ms", app.interval_ms),
        format!("Keeping {} samples per metric", app.history_capacity),
        format!("Disk usage for {}", app.disk_path.display()),
        "Stale values are dimmed".to_string(),
    ];

    // Borders, key rows, a spacer line, notes.
    let height = entries.len() as u16 + notes.len() as u16 + 3;
    let popup = popup_area(area, WIDTH, height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            " Keybinds ",
            Style::default()
                .fg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.surface_bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [keys_area, _, notes_area] = Layout::vertical([
        Constraint::Length(entries.len() as u16),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    let key_width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(1) as u16 + 2;
    let key_style = Style::default()
        .fg(theme.pill_key_fg)
        .bg(theme.pill_key_bg)
        .add_modifier(Modifier::BOLD);
    let rows = entries.iter().map(|(key, desc)| {
        Row::new([
            Cell::from(format!(" {key} ")).style(key_style),
            Cell::from(*desc).style(Style::default().fg(theme.pill_desc_fg)),
        ])
    });
    frame.render_widget(
        Table::new(rows, [Constraint::Length(key_width), Constraint::Fill(1)]).column_spacing(2),
        keys_area,
    );

    let lines: Vec<Line> = notes
        .into_iter()
        .map(|note| Line::styled(note, Style::default().fg(theme.text_secondary)))
        .collect();
    frame.render_widget(Paragraph::new(lines), notes_area);
}

/// `width` x `height` centred in `area`, shrunk to fit.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centred_and_clamped() {
        let area = Rect::new(0, 0, 100, 30);
        assert_eq!(popup_area(area, 44, 10), Rect::new(28, 10, 44, 10));

        let small = Rect::new(2, 1, 20, 5);
        assert_eq!(popup_area(small, 44, 10), small);
    }
}
