pub mod charts;
pub mod header;
pub mod help;
pub mod labels;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(
        frame,
        chunks[0],
        &app.snapshot,
        &app.theme,
        app.interval_ms,
        app.history_capacity,
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(52), Constraint::Min(20)])
        .split(chunks[1]);

    labels::render(frame, body[0], &app.snapshot, &app.theme);
    charts::render(frame, body[1], &app.snapshot, &app.theme, &app.disk_path);

    statusbar::render(frame, chunks[2], &app.help_entries(), &app.theme);

    // Help overlay is drawn last so it sits on top
    if app.show_help() {
        help::render(frame, frame.area(), app);
    }
}
