use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use tokio::sync::mpsc;

use crate::app::{App, AsyncAction};
use crate::chrome::ChromeEvent;
use crate::handlers::async_actions::{open_navigation, run_effects};

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, tx: &mpsc::Sender<AsyncAction>) {
    let pos = Position::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.chrome.notice.is_some() {
                app.dispatch(ChromeEvent::NoticeDismissed);
                return;
            }

            let layout = &app.chrome_layout;
            let on_chrome = layout.in_mode_selector(pos)
                || layout.in_profile_menu(pos)
                || layout.scan_button.contains(pos);
            let events = layout.click_events(pos);
            let effects = app.dispatch_all(events);
            run_effects(app, effects, tx);

            if !on_chrome {
                if let Some(index) = app.card_at(pos) {
                    app.select_card(index);
                    if let Some(navigation) = app.activate_selected() {
                        open_navigation(app, &navigation);
                    }
                }
            }
        }
        MouseEventKind::Moved => {
            let events = app.chrome_layout.hover_events(app.last_pointer, pos);
            app.last_pointer = Some(pos);
            let effects = app.dispatch_all(events);
            run_effects(app, effects, tx);
        }
        MouseEventKind::ScrollDown => app.next_row(),
        MouseEventKind::ScrollUp => app.previous_row(),
        _ => {}
    }
}
