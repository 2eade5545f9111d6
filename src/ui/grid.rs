use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::card::{MediaCard, Poster};
use crate::ui::colors::{
    ACCENT, ACCENT_SOFT, ANIME_PINK, BORDER, HIGHLIGHT_BG, QUALITY_GOLD, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::ui::utils::{first_visible_row, grid_columns, progress_bar, CARD_HEIGHT, CARD_WIDTH};

pub fn render_grid(f: &mut Frame, app: &mut App, area: Rect) {
    let columns = grid_columns(area.width);
    let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
    app.grid_columns = columns;
    app.card_areas.clear();

    let page = app.current_page();
    let selected = page.selected;
    let first_row = first_visible_row(selected, columns, visible_rows);
    let start = first_row * columns;

    let mut areas = Vec::new();
    for (offset, card) in page.cards.iter().skip(start).take(columns * visible_rows).enumerate() {
        let index = start + offset;
        let col = (offset % columns) as u16;
        let row = (offset / columns) as u16;
        let card_area = Rect::new(
            area.x + col * CARD_WIDTH,
            area.y + row * CARD_HEIGHT,
            CARD_WIDTH.min(area.width),
            CARD_HEIGHT.min(area.height),
        )
        .intersection(area);

        render_card(f, card, card_area, index == selected);
        areas.push((index, card_area));
    }

    app.card_areas = areas;
}

fn render_card(f: &mut Frame, card: &MediaCard, area: Rect, selected: bool) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    match &card.poster {
        Poster::Image { url, .. } => {
            lines.push(Line::from(Span::styled("🖼  pòster", Style::default().fg(TEXT_SECONDARY))));
            lines.push(Line::from(Span::styled(
                truncate(url, inner_width),
                Style::default().fg(TEXT_DIM),
            )));
        }
        Poster::Placeholder { icon, title } => {
            lines.push(Line::from(format!("{}  {}", icon, truncate(title, inner_width.saturating_sub(3)))));
            lines.push(Line::from(""));
        }
    }

    let mut badges = vec![
        Span::styled(" ▶ ", Style::default().fg(TEXT_PRIMARY).bg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
    ];
    if card.is_anime {
        badges.push(Span::styled(" Anime ", Style::default().bg(ANIME_PINK).fg(TEXT_PRIMARY)));
        badges.push(Span::raw(" "));
    }
    if let Some(quality) = &card.quality {
        badges.push(Span::styled(
            format!(" {} ", quality),
            Style::default().fg(QUALITY_GOLD).add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(badges));

    if card.show_progress() {
        lines.push(Line::from(Span::styled(
            progress_bar(card.progress, inner_width),
            Style::default().fg(ACCENT),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        truncate(&card.title, inner_width),
        Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        truncate(&card.meta_line(), inner_width),
        Style::default().fg(TEXT_SECONDARY),
    )));

    let (border, bg) = if selected { (ACCENT_SOFT, HIGHLIGHT_BG) } else { (BORDER, ratatui::style::Color::Reset) };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    if selected {
        block = block.title(Span::styled(" ▶ ", Style::default().fg(ACCENT_SOFT).add_modifier(Modifier::BOLD)));
    }

    f.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)).block(block), area);
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
