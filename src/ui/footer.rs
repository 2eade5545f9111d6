use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::catalog::ItemSource;
use crate::ui::colors::{QUALITY_GOLD, TEXT_DIM};

pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::White);

    let mut spans = vec![
        Span::styled(" q ", key_style),
        Span::styled("Sortir  ", label_style),
        Span::styled(" Tab ", key_style),
        Span::styled("Pàgina  ", label_style),
        Span::styled(" ←↑↓→ ", key_style),
        Span::styled("Moure  ", label_style),
        Span::styled(" Enter ", key_style),
        Span::styled("Obrir  ", label_style),
    ];

    if app.chrome.mode_dropdown_open {
        spans.push(Span::styled(" 1-3 ", key_style));
        spans.push(Span::styled("Triar mode  ", label_style));
    } else {
        spans.push(Span::styled(" m ", key_style));
        spans.push(Span::styled("Mode  ", label_style));
    }
    spans.push(Span::styled(" s ", key_style));
    spans.push(Span::styled("Escanejar  ", label_style));
    spans.push(Span::styled(" r ", key_style));
    spans.push(Span::styled("Recarregar", label_style));

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Left), area);

    if app.current_page().source == Some(ItemSource::Mock) {
        let demo = Paragraph::new(Line::from(vec![
            Span::styled("DADES DE DEMOSTRACIÓ", Style::default().fg(QUALITY_GOLD).add_modifier(Modifier::BOLD)),
            Span::styled(" ", Style::default().fg(TEXT_DIM)),
        ]))
        .alignment(Alignment::Right);
        f.render_widget(demo, area);
    }
}
