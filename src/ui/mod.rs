pub mod colors;
pub mod footer;
pub mod grid;
pub mod header;
pub mod loading;
pub mod popups;
pub mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, PageView};
use crate::ui::colors::{TEXT_PRIMARY, TEXT_SECONDARY};

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Page title + mode subtitle
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    header::render_header(f, app, chunks[0]);
    render_title(f, app, chunks[1]);

    match app.current_page().view {
        PageView::Loading => {
            app.card_areas.clear();
            loading::render_loading(f, app, chunks[2]);
        }
        PageView::Empty => {
            app.card_areas.clear();
            loading::render_empty(f, app, chunks[2]);
        }
        PageView::Grid => grid::render_grid(f, app, chunks[2]),
    }

    footer::render_footer(f, app, chunks[3]);

    // Overlays
    popups::render_mode_dropdown(f, app, area);
    popups::render_profile_dropdown(f, app, area);
    if let Some(message) = app.chrome.notice.clone() {
        popups::render_notice(f, &message, area);
    }
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", app.page.title()),
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", app.view_mode.subtitle()),
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CatalogItem;
    use crate::card::MediaCard;
    use crate::catalog::{CatalogKind, ItemSource, MovieCatalog};
    use crate::config::AppConfig;
    use crate::storage::MemoryStore;
    use crate::view_mode::ViewMode;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        App::new(AppConfig::default(), MemoryStore::shared())
    }

    #[test]
    fn test_empty_state_replaces_grid() {
        let mut app = app();
        let generation = app.movies.begin_load();
        app.movies.finish_load(generation, Vec::new(), None);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("No hi ha pel·lícules"));
        assert!(app.card_areas.is_empty());
    }

    #[test]
    fn test_grid_records_card_areas() {
        let mut app = app();
        let cards: Vec<MediaCard> = MovieCatalog::mock(ViewMode::Normal)
            .into_iter()
            .map(|m| MediaCard::build(&CatalogItem::from(m), &app.progress, "http://localhost:3001"))
            .collect();
        let count = cards.len();
        let generation = app.movies.begin_load();
        app.movies.finish_load(generation, cards, Some(ItemSource::Mock));

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Mode Normal"));
        assert!(text.contains("DADES DE DEMOSTRACIÓ"));
        assert!(!app.card_areas.is_empty());
        assert!(app.card_areas.len() <= count);
        assert_eq!(app.card_areas[0].0, 0);
        // Every card carries a play marker, plus one on the selected card's border
        assert_eq!(text.matches('▶').count(), app.card_areas.len() + 1);
    }

    #[test]
    fn test_open_dropdown_records_options() {
        let mut app = app();
        app.chrome.mode_dropdown_open = true;

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();

        assert_eq!(app.chrome_layout.mode_options.len(), 3);
        assert!(app.chrome_layout.mode_dropdown.area() > 0);

        app.chrome.mode_dropdown_open = false;
        terminal.draw(|f| ui(f, &mut app)).unwrap();
        assert!(app.chrome_layout.mode_options.is_empty());
        assert_eq!(app.chrome_layout.mode_dropdown, Rect::default());
    }
}
