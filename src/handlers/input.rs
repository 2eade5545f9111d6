use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::app::{App, AsyncAction};
use crate::chrome::{ChromeEvent, MODE_OPTIONS};
use crate::handlers::async_actions::{open_navigation, run_effects, spawn_catalog_load};

pub enum InputResult {
    Quit,
    Continue,
}

pub fn handle_key_event(app: &mut App, key: KeyEvent, tx: &mpsc::Sender<AsyncAction>) -> InputResult {
    // Only process key press events, not release (Windows sends both)
    if key.kind != KeyEventKind::Press {
        return InputResult::Continue;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Quit;
    }

    // A notice is modal until dismissed
    if app.chrome.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dispatch(ChromeEvent::NoticeDismissed);
        }
        return InputResult::Continue;
    }

    let events = match key.code {
        KeyCode::Char('q') => return InputResult::Quit,
        KeyCode::Char('m') => vec![ChromeEvent::ModeButtonClicked],
        KeyCode::Char(c @ '1'..='3') if app.chrome.mode_dropdown_open => {
            let index = c as usize - '1' as usize;
            vec![ChromeEvent::ModeOptionClicked(MODE_OPTIONS[index])]
        }
        KeyCode::Char('p') => {
            if app.chrome.profile_dropdown_open {
                vec![ChromeEvent::ProfileLeft]
            } else {
                vec![ChromeEvent::ProfileEntered]
            }
        }
        KeyCode::Char('s') => vec![ChromeEvent::ScanClicked],
        KeyCode::Esc => vec![ChromeEvent::DocumentClicked {
            in_mode_selector: false,
            in_profile_menu: false,
        }],
        KeyCode::Char('r') => {
            let page = app.page;
            spawn_catalog_load(app, page, tx);
            Vec::new()
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.switch_page();
            if !app.current_page().loaded_once {
                let page = app.page;
                spawn_catalog_load(app, page, tx);
            }
            Vec::new()
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.next_card();
            Vec::new()
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.previous_card();
            Vec::new()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.next_row();
            Vec::new()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.previous_row();
            Vec::new()
        }
        KeyCode::Enter => {
            if let Some(navigation) = app.activate_selected() {
                open_navigation(app, &navigation);
            }
            Vec::new()
        }
        _ => Vec::new(),
    };

    let effects = app.dispatch_all(events);
    run_effects(app, effects, tx);
    InputResult::Continue
}
