//! Header chrome: mode selector, profile menu and the library scan action.
//!
//! Input is reduced by [`reduce`], a pure function from the current state and
//! one event to the next state plus a list of side effects. The app applies
//! the effects (persist view mode, start a scan, show a notice, reload) in
//! the same step, so a render never observes a half-applied selection.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ratatui::layout::{Position, Rect};

use crate::api::ScanResponse;
use crate::errors::ScanError;
use crate::view_mode::ViewMode;

/// Options shown in the mode dropdown, top to bottom.
pub const MODE_OPTIONS: [ViewMode; 3] = [ViewMode::Normal, ViewMode::Mixed, ViewMode::Anime];

#[derive(Debug, Clone, PartialEq)]
pub enum ChromeEvent {
    ModeButtonClicked,
    ModeSelectorEntered,
    ModeSelectorLeft,
    ModeOptionClicked(ViewMode),
    ProfileEntered,
    ProfileLeft,
    /// Click anywhere, after the target's own handler ran
    DocumentClicked {
        in_mode_selector: bool,
        in_profile_menu: bool,
    },
    ScanClicked,
    ScanFinished(Result<ScanResponse, ScanError>),
    NoticeDismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetViewMode(ViewMode),
    StartScan,
    ShowNotice(String),
    Reload,
}

/// Spin indicator on the scan button. Only a [`SpinGuard`] can turn it on,
/// and dropping the guard always turns it off.
#[derive(Debug, Clone, Default)]
pub struct ScanSpinner(Arc<AtomicBool>);

impl ScanSpinner {
    pub fn is_spinning(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn acquire(&self) -> SpinGuard {
        self.0.store(true, Ordering::SeqCst);
        SpinGuard(self.0.clone())
    }
}

#[derive(Debug)]
pub struct SpinGuard(Arc<AtomicBool>);

impl Drop for SpinGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChromeState {
    pub mode_dropdown_open: bool,
    pub profile_dropdown_open: bool,
    /// Option carrying the active marker; `None` when the stored tag matches
    /// no option
    pub active_mode: Option<ViewMode>,
    pub spinner: ScanSpinner,
    pub notice: Option<String>,
}

impl ChromeState {
    /// Initial state, with the active marker on the option whose tag equals
    /// the stored raw mode.
    pub fn new(raw_mode: &str) -> Self {
        Self {
            active_mode: MODE_OPTIONS.iter().copied().find(|m| m.tag() == raw_mode),
            ..Default::default()
        }
    }
}

pub fn reduce(state: &ChromeState, event: ChromeEvent) -> (ChromeState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        ChromeEvent::ModeButtonClicked => {
            next.mode_dropdown_open = !state.mode_dropdown_open;
        }
        ChromeEvent::ModeSelectorEntered => next.mode_dropdown_open = true,
        ChromeEvent::ModeSelectorLeft => next.mode_dropdown_open = false,
        ChromeEvent::ModeOptionClicked(mode) => {
            next.mode_dropdown_open = false;
            next.active_mode = Some(mode);
            effects.push(Effect::SetViewMode(mode));
        }
        ChromeEvent::ProfileEntered => next.profile_dropdown_open = true,
        ChromeEvent::ProfileLeft => next.profile_dropdown_open = false,
        ChromeEvent::DocumentClicked {
            in_mode_selector,
            in_profile_menu,
        } => {
            if !in_mode_selector {
                next.mode_dropdown_open = false;
            }
            if !in_profile_menu {
                next.profile_dropdown_open = false;
            }
        }
        ChromeEvent::ScanClicked => {
            if !state.spinner.is_spinning() {
                effects.push(Effect::StartScan);
            }
        }
        ChromeEvent::ScanFinished(Ok(scan)) => match scan.summary() {
            Some(summary) => {
                effects.push(Effect::ShowNotice(summary));
                effects.push(Effect::Reload);
            }
            None => {
                tracing::info!(status = %scan.status, "Scan finished without success status");
            }
        },
        ChromeEvent::ScanFinished(Err(e)) => {
            tracing::error!(error = %e, "Library scan failed");
            effects.push(Effect::ShowNotice(e.user_message().to_string()));
        }
        ChromeEvent::NoticeDismissed => next.notice = None,
    }

    for effect in &effects {
        if let Effect::ShowNotice(message) = effect {
            next.notice = Some(message.clone());
        }
    }

    (next, effects)
}

/// Screen regions of the chrome controls, recorded at render time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChromeLayout {
    pub mode_button: Rect,
    /// Drawn dropdown area; empty while closed
    pub mode_dropdown: Rect,
    pub mode_options: Vec<(ViewMode, Rect)>,
    pub profile_button: Rect,
    pub profile_dropdown: Rect,
    pub scan_button: Rect,
}

impl ChromeLayout {
    pub fn in_mode_selector(&self, pos: Position) -> bool {
        self.mode_button.contains(pos) || self.mode_dropdown.contains(pos)
    }

    pub fn in_profile_menu(&self, pos: Position) -> bool {
        self.profile_button.contains(pos) || self.profile_dropdown.contains(pos)
    }

    /// Events produced by a click, in dispatch order: the target's handler
    /// first, then the document-level outside-click check. The mode button
    /// swallows the click so the document never sees it.
    pub fn click_events(&self, pos: Position) -> Vec<ChromeEvent> {
        if self.mode_button.contains(pos) {
            return vec![ChromeEvent::ModeButtonClicked];
        }

        let mut events = Vec::new();
        if let Some((mode, _)) = self.mode_options.iter().find(|(_, r)| r.contains(pos)) {
            events.push(ChromeEvent::ModeOptionClicked(*mode));
        } else if self.scan_button.contains(pos) {
            events.push(ChromeEvent::ScanClicked);
        }
        events.push(ChromeEvent::DocumentClicked {
            in_mode_selector: self.in_mode_selector(pos),
            in_profile_menu: self.in_profile_menu(pos),
        });
        events
    }

    /// Enter/leave events for a pointer moving from `from` to `to`.
    pub fn hover_events(&self, from: Option<Position>, to: Position) -> Vec<ChromeEvent> {
        let mut events = Vec::new();
        let was_mode = from.is_some_and(|p| self.in_mode_selector(p));
        let was_profile = from.is_some_and(|p| self.in_profile_menu(p));

        match (was_mode, self.in_mode_selector(to)) {
            (false, true) => events.push(ChromeEvent::ModeSelectorEntered),
            (true, false) => events.push(ChromeEvent::ModeSelectorLeft),
            _ => {}
        }
        match (was_profile, self.in_profile_menu(to)) {
            (false, true) => events.push(ChromeEvent::ProfileEntered),
            (true, false) => events.push(ChromeEvent::ProfileLeft),
            _ => {}
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ScanStats;

    fn apply(state: &ChromeState, events: Vec<ChromeEvent>) -> (ChromeState, Vec<Effect>) {
        let mut state = state.clone();
        let mut all = Vec::new();
        for event in events {
            let (next, effects) = reduce(&state, event);
            state = next;
            all.extend(effects);
        }
        (state, all)
    }

    fn layout() -> ChromeLayout {
        ChromeLayout {
            mode_button: Rect::new(40, 0, 12, 1),
            mode_dropdown: Rect::new(40, 1, 12, 3),
            mode_options: vec![
                (ViewMode::Normal, Rect::new(40, 1, 12, 1)),
                (ViewMode::Mixed, Rect::new(40, 2, 12, 1)),
                (ViewMode::Anime, Rect::new(40, 3, 12, 1)),
            ],
            profile_button: Rect::new(70, 0, 8, 1),
            profile_dropdown: Rect::default(),
            scan_button: Rect::new(60, 0, 6, 1),
        }
    }

    #[test]
    fn test_initial_active_marker_matches_stored_tag() {
        assert_eq!(ChromeState::new("mixed").active_mode, Some(ViewMode::Mixed));
        assert_eq!(ChromeState::new("bogus").active_mode, None);
    }

    #[test]
    fn test_button_toggles_dropdown() {
        let (open, _) = reduce(&ChromeState::default(), ChromeEvent::ModeButtonClicked);
        assert!(open.mode_dropdown_open);
        let (closed, _) = reduce(&open, ChromeEvent::ModeButtonClicked);
        assert!(!closed.mode_dropdown_open);
    }

    #[test]
    fn test_outside_click_closes_open_dropdowns() {
        let state = ChromeState {
            mode_dropdown_open: true,
            profile_dropdown_open: true,
            ..Default::default()
        };
        let (next, effects) = apply(&state, layout().click_events(Position::new(5, 20)));
        assert!(!next.mode_dropdown_open);
        assert!(!next.profile_dropdown_open);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_mode_button_click_does_not_reach_document() {
        let state = ChromeState {
            profile_dropdown_open: true,
            ..Default::default()
        };
        let (next, _) = apply(&state, layout().click_events(Position::new(41, 0)));
        assert!(next.mode_dropdown_open);
        assert!(next.profile_dropdown_open);
    }

    #[test]
    fn test_option_click_selects_closes_and_marks_in_one_step() {
        let state = ChromeState {
            mode_dropdown_open: true,
            active_mode: Some(ViewMode::Normal),
            ..Default::default()
        };
        let events = layout().click_events(Position::new(45, 3));
        assert_eq!(events[0], ChromeEvent::ModeOptionClicked(ViewMode::Anime));

        let (next, effects) = reduce(&state, events[0].clone());
        assert!(!next.mode_dropdown_open);
        assert_eq!(next.active_mode, Some(ViewMode::Anime));
        assert_eq!(effects, vec![Effect::SetViewMode(ViewMode::Anime)]);
    }

    #[test]
    fn test_hover_opens_and_leave_closes() {
        let l = layout();
        let (open, _) = apply(&ChromeState::default(), l.hover_events(None, Position::new(42, 0)));
        assert!(open.mode_dropdown_open);

        // Moving down into the dropdown keeps it open
        let inside = l.hover_events(Some(Position::new(42, 0)), Position::new(42, 2));
        assert!(inside.is_empty());

        let (closed, _) = apply(&open, l.hover_events(Some(Position::new(42, 2)), Position::new(10, 10)));
        assert!(!closed.mode_dropdown_open);

        let (profile, _) = apply(&ChromeState::default(), l.hover_events(None, Position::new(71, 0)));
        assert!(profile.profile_dropdown_open);
    }

    #[test]
    fn test_scan_success_notifies_and_reloads() {
        let scan = ScanResponse {
            status: "success".into(),
            stats: ScanStats { series: 3, files: 41 },
        };
        let (next, effects) = reduce(&ChromeState::default(), ChromeEvent::ScanFinished(Ok(scan)));
        assert_eq!(
            effects,
            vec![
                Effect::ShowNotice("Escaneig completat!\n3 sèries\n41 arxius".into()),
                Effect::Reload
            ]
        );
        assert!(next.notice.is_some());
    }

    #[test]
    fn test_scan_failure_shows_generic_error_only() {
        let (next, effects) = reduce(
            &ChromeState::default(),
            ChromeEvent::ScanFinished(Err(ScanError::Network("refused".into()))),
        );
        assert_eq!(effects.len(), 1);
        assert_eq!(
            next.notice.as_deref(),
            Some("Error durant l'escaneig. Assegura't que el backend està en marxa.")
        );
    }

    #[test]
    fn test_spin_guard_always_releases() {
        let spinner = ScanSpinner::default();
        {
            let _guard = spinner.acquire();
            assert!(spinner.is_spinning());
            let (_, effects) = reduce(
                &ChromeState { spinner: spinner.clone(), ..Default::default() },
                ChromeEvent::ScanClicked,
            );
            assert!(effects.is_empty());
        }
        assert!(!spinner.is_spinning());

        let result = std::panic::catch_unwind(|| {
            let _guard = spinner.acquire();
            panic!("scan task died");
        });
        assert!(result.is_err());
        assert!(!spinner.is_spinning());
    }
}
