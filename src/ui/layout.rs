use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub metrics: Rect,
    pub main: Rect,
    pub status_bar: Rect,
}

pub fn create_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Metrics row
            Constraint::Min(1),    // Event list
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    AppLayout {
        metrics: chunks[0],
        main: chunks[1],
        status_bar: chunks[2],
    }
}
