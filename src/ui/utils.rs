use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const CARD_WIDTH: u16 = 28;
pub const CARD_HEIGHT: u16 = 9;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Number of card columns that fit in `width` (at least one).
pub fn grid_columns(width: u16) -> usize {
    ((width / CARD_WIDTH) as usize).max(1)
}

/// First visible row so that `selected` stays on screen.
pub fn first_visible_row(selected: usize, columns: usize, visible_rows: usize) -> usize {
    let row = selected / columns.max(1);
    let visible_rows = visible_rows.max(1);
    if row >= visible_rows {
        row + 1 - visible_rows
    } else {
        0
    }
}

/// Text progress bar, e.g. `█████░░░░░` for 50% at width 10.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Clips `area` so it lies within `bounds`.
pub fn clamp_to(area: Rect, bounds: Rect) -> Rect {
    area.intersection(bounds)
}
