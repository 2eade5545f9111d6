use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::config::Page;
use crate::ui::colors::{ACCENT, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY};

pub fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let tick = app.loading_tick;
    let spinner_chars = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let spinner = spinner_chars[(tick % spinner_chars.len() as u64) as usize];
    let dots = ".".repeat(((tick / 8) % 4) as usize);

    let msg = match app.page {
        Page::Movies => "Carregant pel·lícules",
        Page::Series => "Carregant sèries",
    };

    let text = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", spinner), Style::default().fg(ACCENT)),
        Span::styled(msg, Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD)),
        Span::styled(dots, Style::default().fg(TEXT_DIM)),
    ]))
    .alignment(Alignment::Center);

    f.render_widget(text, middle_line(area));
}

pub fn render_empty(f: &mut Frame, app: &App, area: Rect) {
    let (icon, title) = match app.page {
        Page::Movies => ("🎬", "No hi ha pel·lícules"),
        Page::Series => ("📺", "No hi ha sèries"),
    };

    let lines = vec![
        Line::from(Span::styled(icon, Style::default())),
        Line::from(Span::styled(title, Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            "Escaneja la biblioteca per afegir contingut (s)",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);
}

fn middle_line(area: Rect) -> Rect {
    Rect::new(area.x, area.y + area.height / 2, area.width, 1.min(area.height))
}
