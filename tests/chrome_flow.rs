use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, Terminal};
use tokio::sync::mpsc;

use hermes_lib::api::{ScanResponse, ScanStats};
use hermes_lib::app::{App, AsyncAction, PageView};
use hermes_lib::config::{AppConfig, Page};
use hermes_lib::errors::ScanError;
use hermes_lib::handlers::async_actions::handle_async_action;
use hermes_lib::handlers::input::{handle_key_event, InputResult};
use hermes_lib::handlers::mouse::handle_mouse_event;
use hermes_lib::storage::{KeyValueStore, MemoryStore, SharedStore};
use hermes_lib::ui;
use hermes_lib::view_mode::{ViewMode, VIEW_MODE_KEY};

fn app_with(store: SharedStore) -> App {
    App::new(AppConfig::default(), store)
}

fn draw(app: &mut App) {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|f| ui::ui(f, app)).unwrap();
}

fn click(app: &mut App, column: u16, row: u16, tx: &mpsc::Sender<AsyncAction>) {
    handle_mouse_event(
        app,
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        },
        tx,
    );
}

fn press(app: &mut App, code: KeyCode, tx: &mpsc::Sender<AsyncAction>) -> InputResult {
    handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE), tx)
}

#[tokio::test]
async fn test_mode_button_click_toggles_and_outside_click_closes() {
    let (tx, _rx) = mpsc::channel(8);
    let mut app = app_with(MemoryStore::shared());
    draw(&mut app);

    let button = app.chrome_layout.mode_button;
    click(&mut app, button.x + 1, button.y + 1, &tx);
    assert!(app.chrome.mode_dropdown_open);

    draw(&mut app);
    // Far corner of the title row, away from every control
    click(&mut app, 0, 4, &tx);
    assert!(!app.chrome.mode_dropdown_open);
}

#[tokio::test]
async fn test_clicking_an_option_persists_mode_and_closes_dropdown() {
    let (tx, _rx) = mpsc::channel(8);
    let store = MemoryStore::shared();
    let mut app = app_with(store.clone());
    draw(&mut app);

    let button = app.chrome_layout.mode_button;
    click(&mut app, button.x + 1, button.y + 1, &tx);
    draw(&mut app);

    let (mode, row) = app.chrome_layout.mode_options[2];
    assert_eq!(mode, ViewMode::Anime);
    click(&mut app, row.x + 1, row.y, &tx);

    assert_eq!(store.get_item(VIEW_MODE_KEY).as_deref(), Some("anime"));
    assert_eq!(app.view_mode.subtitle(), "Mode Anime");
    assert_eq!(app.chrome.active_mode, Some(ViewMode::Anime));
    assert!(!app.chrome.mode_dropdown_open);
}

#[tokio::test]
async fn test_keyboard_mode_selection() {
    let (tx, _rx) = mpsc::channel(8);
    let store = MemoryStore::shared();
    let mut app = app_with(store.clone());

    press(&mut app, KeyCode::Char('m'), &tx);
    assert!(app.chrome.mode_dropdown_open);
    press(&mut app, KeyCode::Char('2'), &tx);

    assert_eq!(store.get_item(VIEW_MODE_KEY).as_deref(), Some("mixed"));
    assert_eq!(app.view_mode.label(), "Mixt");
    assert!(!app.chrome.mode_dropdown_open);
}

#[tokio::test]
async fn test_successful_scan_shows_summary_and_reloads() {
    let (tx, _rx) = mpsc::channel(8);
    let mut app = app_with(MemoryStore::shared());
    let generation = app.movies.begin_load();
    app.movies.finish_load(generation, Vec::new(), None);
    assert_eq!(app.movies.view, PageView::Empty);

    let response = ScanResponse {
        status: "success".to_string(),
        stats: ScanStats { series: 3, files: 42 },
    };
    handle_async_action(&mut app, AsyncAction::ScanFinished(Ok(response)), &tx).await;

    assert_eq!(
        app.chrome.notice.as_deref(),
        Some("Escaneig completat!\n3 sèries\n42 arxius")
    );
    // Reload put the current page back into its loading state
    assert_eq!(app.movies.view, PageView::Loading);
    assert!(!app.chrome.spinner.is_spinning());

    press(&mut app, KeyCode::Enter, &tx);
    assert!(app.chrome.notice.is_none());
}

#[tokio::test]
async fn test_failed_scan_shows_generic_message_without_reload() {
    let (tx, _rx) = mpsc::channel(8);
    let mut app = app_with(MemoryStore::shared());
    let generation = app.movies.begin_load();
    app.movies.finish_load(generation, Vec::new(), None);

    handle_async_action(&mut app, AsyncAction::ScanFinished(Err(ScanError::Status(500))), &tx).await;

    assert_eq!(
        app.chrome.notice.as_deref(),
        Some("Error durant l'escaneig. Assegura't que el backend està en marxa.")
    );
    assert_eq!(app.movies.view, PageView::Empty);
}

#[tokio::test]
async fn test_non_success_scan_status_is_silent() {
    let (tx, _rx) = mpsc::channel(8);
    let mut app = app_with(MemoryStore::shared());

    let response = ScanResponse {
        status: "busy".to_string(),
        stats: ScanStats::default(),
    };
    handle_async_action(&mut app, AsyncAction::ScanFinished(Ok(response)), &tx).await;
    assert!(app.chrome.notice.is_none());
}

#[tokio::test]
async fn test_superseded_load_result_is_dropped() {
    let (tx, _rx) = mpsc::channel(8);
    let mut app = app_with(MemoryStore::shared());
    let stale = app.movies.begin_load();
    let _current = app.movies.begin_load();

    handle_async_action(
        &mut app,
        AsyncAction::CatalogLoaded {
            page: Page::Movies,
            generation: stale,
            cards: Vec::new(),
            source: None,
        },
        &tx,
    )
    .await;

    assert_eq!(app.movies.view, PageView::Loading);
}

#[tokio::test]
async fn test_quit_keys() {
    let (tx, _rx) = mpsc::channel(8);
    let mut app = app_with(MemoryStore::shared());
    assert!(matches!(press(&mut app, KeyCode::Char('q'), &tx), InputResult::Quit));
    assert!(matches!(
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &tx),
        InputResult::Quit
    ));
}
