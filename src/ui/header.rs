use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::config::Page;
use crate::ui::colors::{ACCENT, BORDER, HIGHLIGHT_BG, TEXT_DIM, TEXT_PRIMARY};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn render_header(f: &mut Frame, app: &mut App, area: Rect) {
    let mode_text = format!(" Mode: {} ▾ ", app.view_mode.label());
    let scan_text = if app.chrome.spinner.is_spinning() {
        format!(" {} Escanejant ", SPINNER[(app.loading_tick % SPINNER.len() as u64) as usize])
    } else {
        " ⟳ Escanejar ".to_string()
    };
    let profile_text = " 👤 Perfil ▾ ";

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(scan_text.chars().count() as u16 + 2),
            Constraint::Length(mode_text.chars().count() as u16 + 2),
            Constraint::Length(profile_text.chars().count() as u16 + 3),
        ])
        .split(area);

    let style_active = Style::default().bg(ACCENT).fg(Color::White).add_modifier(Modifier::BOLD);
    let style_idle = Style::default().fg(TEXT_DIM);

    let mut spans = vec![Span::styled(
        " HERMES ",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    for page in [Page::Movies, Page::Series] {
        spans.push(Span::raw("  "));
        let label = format!(" {} ", page.title());
        spans.push(if page == app.page {
            Span::styled(label, style_active)
        } else {
            Span::styled(label, style_idle)
        });
    }

    let tabs = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(BORDER)),
    );
    f.render_widget(tabs, chunks[0]);

    render_button(f, chunks[1], &scan_text, app.chrome.spinner.is_spinning());
    render_button(f, chunks[2], &mode_text, app.chrome.mode_dropdown_open);
    render_button(f, chunks[3], profile_text, app.chrome.profile_dropdown_open);

    app.chrome_layout.scan_button = chunks[1];
    app.chrome_layout.mode_button = chunks[2];
    app.chrome_layout.profile_button = chunks[3];
}

fn render_button(f: &mut Frame, area: Rect, text: &str, pressed: bool) {
    let (fg, bg) = if pressed { (TEXT_PRIMARY, HIGHLIGHT_BG) } else { (TEXT_PRIMARY, Color::Reset) };
    let button = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(fg).bg(bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(if pressed { ACCENT } else { BORDER })),
        );
    f.render_widget(button, area);
}
