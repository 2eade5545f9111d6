use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::chrome::MODE_OPTIONS;
use crate::ui::colors::{ACCENT, ACCENT_SOFT, BORDER, HIGHLIGHT_BG, TEXT_DIM, TEXT_PRIMARY};
use crate::ui::utils::{centered_rect, clamp_to};

const PROFILE_ENTRIES: [&str; 3] = ["El meu perfil", "Configuració", "Tancar sessió"];

/// Draws the mode dropdown under its button and records the option rows for
/// hit testing. Records an empty region while closed.
pub fn render_mode_dropdown(f: &mut Frame, app: &mut App, bounds: Rect) {
    app.chrome_layout.mode_options.clear();
    if !app.chrome.mode_dropdown_open {
        app.chrome_layout.mode_dropdown = Rect::default();
        return;
    }

    let button = app.chrome_layout.mode_button;
    let width = button.width.max(22);
    let area = clamp_to(
        Rect::new(button.x, button.y + button.height, width, MODE_OPTIONS.len() as u16 + 2),
        bounds,
    );
    app.chrome_layout.mode_dropdown = area;

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_SOFT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (i, mode) in MODE_OPTIONS.iter().enumerate() {
        let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1).intersection(inner);
        if row.is_empty() {
            continue;
        }

        let active = app.chrome.active_mode == Some(*mode);
        let style = if active {
            Style::default().fg(TEXT_PRIMARY).bg(HIGHLIGHT_BG).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_PRIMARY)
        };
        let marker = if active { "● " } else { "  " };
        let line = Line::from(vec![
            Span::styled(format!("{}{} ", i + 1, marker), Style::default().fg(ACCENT)),
            Span::styled(mode.subtitle().trim_start_matches("Mode ").to_string(), style),
        ]);
        f.render_widget(Paragraph::new(line).style(style), row);
        app.chrome_layout.mode_options.push((*mode, row));
    }
}

pub fn render_profile_dropdown(f: &mut Frame, app: &mut App, bounds: Rect) {
    if !app.chrome.profile_dropdown_open {
        app.chrome_layout.profile_dropdown = Rect::default();
        return;
    }

    let button = app.chrome_layout.profile_button;
    let width = 20u16;
    let x = (button.x + button.width).saturating_sub(width);
    let area = clamp_to(
        Rect::new(x, button.y + button.height, width, PROFILE_ENTRIES.len() as u16 + 2),
        bounds,
    );
    app.chrome_layout.profile_dropdown = area;

    let lines: Vec<Line> = PROFILE_ENTRIES
        .iter()
        .map(|entry| Line::from(Span::styled(format!(" {}", entry), Style::default().fg(TEXT_PRIMARY))))
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER)),
        ),
        area,
    );
}

pub fn render_notice(f: &mut Frame, message: &str, area: Rect) {
    let area = centered_rect(50, 30, area);
    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = message
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(TEXT_PRIMARY))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("[Enter] D'acord", Style::default().fg(TEXT_DIM))));

    let block = Block::default()
        .title(" Hermes ")
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(ACCENT));

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
