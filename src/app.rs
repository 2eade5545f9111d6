use ratatui::layout::{Position, Rect};

use crate::api::{HermesClient, ScanResponse};
use crate::card::{MediaCard, Navigation};
use crate::catalog::ItemSource;
use crate::chrome::{self, ChromeEvent, ChromeLayout, ChromeState, Effect};
use crate::config::{AppConfig, Page};
use crate::errors::ScanError;
use crate::progress::ProgressStore;
use crate::storage::SharedStore;
use crate::view_mode::ViewModeStore;

#[derive(Debug, Clone)]
pub enum AsyncAction {
    CatalogLoaded {
        page: Page,
        generation: u64,
        cards: Vec<MediaCard>,
        source: Option<ItemSource>,
    },
    ScanFinished(Result<ScanResponse, ScanError>),
}

/// Which of the three mutually exclusive page bodies is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageView {
    #[default]
    Loading,
    Empty,
    Grid,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogPage {
    pub view: PageView,
    pub cards: Vec<MediaCard>,
    pub source: Option<ItemSource>,
    pub selected: usize,
    /// Bumped on every load so stale results are dropped
    pub generation: u64,
    pub loaded_once: bool,
}

impl CatalogPage {
    pub fn begin_load(&mut self) -> u64 {
        self.view = PageView::Loading;
        self.generation += 1;
        self.generation
    }

    /// Applies a finished load. Returns false when a newer load superseded it.
    pub fn finish_load(&mut self, generation: u64, cards: Vec<MediaCard>, source: Option<ItemSource>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.view = if cards.is_empty() { PageView::Empty } else { PageView::Grid };
        self.cards = cards;
        self.source = source;
        self.selected = 0;
        self.loaded_once = true;
        true
    }

    pub fn selected_card(&self) -> Option<&MediaCard> {
        if self.view != PageView::Grid {
            return None;
        }
        self.cards.get(self.selected)
    }
}

pub struct App {
    pub config: AppConfig,
    pub client: HermesClient,
    pub view_mode: ViewModeStore,
    pub progress: ProgressStore,
    pub chrome: ChromeState,
    pub chrome_layout: ChromeLayout,
    pub page: Page,
    pub movies: CatalogPage,
    pub series: CatalogPage,
    /// Card rectangles from the last render, in card order
    pub card_areas: Vec<(usize, Rect)>,
    pub grid_columns: usize,
    pub last_pointer: Option<Position>,
    pub loading_tick: u64,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, store: SharedStore) -> App {
        let client = HermesClient::new(config.api_base_url.clone(), config.request_timeout());
        let view_mode = ViewModeStore::load(store.clone());
        let chrome = ChromeState::new(view_mode.raw());

        App {
            page: config.default_page,
            client,
            view_mode,
            progress: ProgressStore::new(store),
            chrome,
            chrome_layout: ChromeLayout::default(),
            movies: CatalogPage::default(),
            series: CatalogPage::default(),
            card_areas: Vec::new(),
            grid_columns: 1,
            last_pointer: None,
            loading_tick: 0,
            should_quit: false,
            config,
        }
    }

    pub fn current_page(&self) -> &CatalogPage {
        self.page_state(self.page)
    }

    pub fn current_page_mut(&mut self) -> &mut CatalogPage {
        self.page_state_mut(self.page)
    }

    pub fn page_state(&self, page: Page) -> &CatalogPage {
        match page {
            Page::Movies => &self.movies,
            Page::Series => &self.series,
        }
    }

    pub fn page_state_mut(&mut self, page: Page) -> &mut CatalogPage {
        match page {
            Page::Movies => &mut self.movies,
            Page::Series => &mut self.series,
        }
    }

    /// Runs one chrome event through the reducer and applies the effects
    /// that only touch local state. Effects needing I/O (scan, reload) are
    /// returned to the caller.
    pub fn dispatch(&mut self, event: ChromeEvent) -> Vec<Effect> {
        let (next, effects) = chrome::reduce(&self.chrome, event);
        self.chrome = next;

        effects
            .into_iter()
            .filter(|effect| match effect {
                Effect::SetViewMode(mode) => {
                    self.view_mode.set(*mode);
                    false
                }
                Effect::ShowNotice(_) => false,
                Effect::StartScan | Effect::Reload => true,
            })
            .collect()
    }

    pub fn dispatch_all(&mut self, events: Vec<ChromeEvent>) -> Vec<Effect> {
        events.into_iter().flat_map(|e| self.dispatch(e)).collect()
    }

    pub fn switch_page(&mut self) {
        self.page = self.page.toggle();
        self.card_areas.clear();
    }

    pub fn next_card(&mut self) {
        let page = self.current_page_mut();
        if !page.cards.is_empty() {
            page.selected = (page.selected + 1) % page.cards.len();
        }
    }

    pub fn previous_card(&mut self) {
        let page = self.current_page_mut();
        if !page.cards.is_empty() {
            page.selected = page.selected.checked_sub(1).unwrap_or(page.cards.len() - 1);
        }
    }

    pub fn next_row(&mut self) {
        let cols = self.grid_columns.max(1);
        let page = self.current_page_mut();
        if page.selected + cols < page.cards.len() {
            page.selected += cols;
        }
    }

    pub fn previous_row(&mut self) {
        let cols = self.grid_columns.max(1);
        let page = self.current_page_mut();
        page.selected = page.selected.saturating_sub(cols);
    }

    pub fn select_card(&mut self, index: usize) {
        let page = self.current_page_mut();
        if index < page.cards.len() {
            page.selected = index;
        }
    }

    pub fn activate_selected(&self) -> Option<Navigation> {
        self.current_page().selected_card().map(|c| c.navigation.clone())
    }

    /// Card index under a screen position, from the last render.
    pub fn card_at(&self, pos: Position) -> Option<usize> {
        self.card_areas
            .iter()
            .find(|(_, area)| area.contains(pos))
            .map(|(index, _)| *index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::view_mode::{ViewMode, VIEW_MODE_KEY};

    fn app() -> App {
        App::new(AppConfig::default(), MemoryStore::shared())
    }

    #[test]
    fn test_app_new() {
        let app = app();
        assert_eq!(app.page, Page::Movies);
        assert_eq!(app.movies.view, PageView::Loading);
        assert_eq!(app.chrome.active_mode, Some(ViewMode::Normal));
    }

    #[test]
    fn test_option_selection_updates_store_label_and_marker_together() {
        let store = MemoryStore::shared();
        let mut app = App::new(AppConfig::default(), store.clone());
        app.chrome.mode_dropdown_open = true;

        let pending = app.dispatch(ChromeEvent::ModeOptionClicked(ViewMode::Mixed));

        assert!(pending.is_empty());
        assert_eq!(store.get_item(VIEW_MODE_KEY).as_deref(), Some("mixed"));
        assert_eq!(app.view_mode.label(), "Mixt");
        assert_eq!(app.chrome.active_mode, Some(ViewMode::Mixed));
        assert!(!app.chrome.mode_dropdown_open);
    }

    #[test]
    fn test_app_reads_stored_mode_and_default_page() {
        let store = MemoryStore::shared();
        store.set_item(VIEW_MODE_KEY, "mixed").unwrap();

        let app = App::new(
            AppConfig {
                default_page: Page::Series,
                ..AppConfig::default()
            },
            store,
        );
        assert_eq!(app.page, Page::Series);
        assert_eq!(app.view_mode.get(), ViewMode::Mixed);
        assert_eq!(app.chrome.active_mode, Some(ViewMode::Mixed));
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut page = CatalogPage::default();
        let first = page.begin_load();
        let second = page.begin_load();
        assert!(!page.finish_load(first, Vec::new(), None));
        assert_eq!(page.view, PageView::Loading);
        assert!(page.finish_load(second, Vec::new(), None));
        assert_eq!(page.view, PageView::Empty);
    }

    #[test]
    fn test_selection_wraps_and_steps_rows() {
        let mut app = app();
        let cards = crate::catalog::build_cards(
            crate::catalog::LoadOutcome::Items(
                <crate::catalog::MovieCatalog as crate::catalog::CatalogKind>::mock(ViewMode::Mixed),
                ItemSource::Mock,
            ),
            &app.progress,
            "http://localhost:8000",
        );
        let generation = app.movies.begin_load();
        app.movies.finish_load(generation, cards, Some(ItemSource::Mock));
        app.grid_columns = 4;

        app.previous_card();
        assert_eq!(app.movies.selected, 7);
        app.next_card();
        assert_eq!(app.movies.selected, 0);
        app.next_row();
        assert_eq!(app.movies.selected, 4);
        app.next_row();
        assert_eq!(app.movies.selected, 4);
        assert_eq!(
            app.activate_selected().map(|n| n.target()),
            Some("player.html?id=5&type=movie".to_string())
        );
    }
}
