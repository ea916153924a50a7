//! Keyboard input dispatch: overlays first, then the chart modal, then main screen keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, Overlay};

/// Filter thresholds move in steps of this size.
const THRESHOLD_STEP: f64 = 5.0;
const LIMIT_STEP: i64 = 1;
const LIMIT_JUMP: i64 = 5;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Symbols(_) => {
            handle_symbols_overlay(app, key);
            return;
        }
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. The chart modal is open whenever the history slot is.
    if app.radar.history().state().is_open() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                app.radar.history_mut().close_history();
            }
            KeyCode::Char('r') => {
                let ticker = app.radar.history().state().ticker().map(String::from);
                if let Some(ticker) = ticker {
                    app.radar.history_mut().open_history(&ticker);
                }
            }
            _ => {}
        }
        return;
    }

    // 3. Main screen.
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('+') | KeyCode::Char('=') => step_limit(app, LIMIT_STEP),
        KeyCode::Char('-') => step_limit(app, -LIMIT_STEP),
        KeyCode::Char(']') => step_limit(app, LIMIT_JUMP),
        KeyCode::Char('[') => step_limit(app, -LIMIT_JUMP),
        KeyCode::Char('r') => {
            app.radar.signals_mut().refresh();
        }
        KeyCode::Char('t') => {
            let draft = app.radar.signals().symbols_input().to_string();
            app.overlay = Overlay::Symbols(draft);
        }
        KeyCode::Char('s') => adjust(app, |c| c.set_min_score(c.min_score() - THRESHOLD_STEP)),
        KeyCode::Char('S') => adjust(app, |c| c.set_min_score(c.min_score() + THRESHOLD_STEP)),
        KeyCode::Char('n') => adjust(app, |c| c.set_rsi_min(c.rsi_min() - THRESHOLD_STEP)),
        KeyCode::Char('N') => adjust(app, |c| c.set_rsi_min(c.rsi_min() + THRESHOLD_STEP)),
        KeyCode::Char('x') => adjust(app, |c| c.set_rsi_max(c.rsi_max() - THRESHOLD_STEP)),
        KeyCode::Char('X') => adjust(app, |c| c.set_rsi_max(c.rsi_max() + THRESHOLD_STEP)),
        KeyCode::Char('b') => adjust(app, |c| c.toggle_bullish()),
        KeyCode::Char('u') => adjust(app, |c| c.toggle_uptrend()),
        KeyCode::Char('c') => adjust(app, |c| c.reset()),
        KeyCode::Enter => match app.selected_ticker() {
            Some(ticker) => {
                app.radar.history_mut().open_history(&ticker);
            }
            None => app.set_warning("No row selected"),
        },
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        _ => {}
    }
}

fn step_limit(app: &mut AppState, delta: i64) {
    let current = app.radar.signals().limit();
    let target = current.offset(delta);
    if app.radar.signals_mut().set_limit(target.get() as i64).is_none() {
        app.set_warning(format!("Limit already at {current}"));
    }
}

fn adjust(app: &mut AppState, f: impl FnOnce(&mut signalradar_core::FilterCriteria)) {
    app.radar.update_criteria(f);
    app.clamp_cursor();
}

fn handle_symbols_overlay(app: &mut AppState, key: KeyEvent) {
    let Overlay::Symbols(draft) = &mut app.overlay else {
        return;
    };
    match key.code {
        KeyCode::Char(c) => draft.push(c),
        KeyCode::Backspace => {
            draft.pop();
        }
        KeyCode::Enter => {
            let text = std::mem::take(draft);
            app.overlay = Overlay::None;
            app.radar.signals_mut().set_symbols_input(text);
            if app.radar.signals().symbols_pending() {
                app.set_warning("Symbols saved; press r to refresh");
            }
        }
        KeyCode::Esc => app.overlay = Overlay::None,
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{app, loaded_app};
    use crate::app::StatusLevel;
    use crossterm::event::KeyModifiers;
    use signalradar_core::state::ModalViewState;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn q_quits() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn release_events_are_ignored() {
        let (mut app, _) = app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.running);
    }

    #[test]
    fn limit_keys_fetch_and_clamp() {
        let (mut app, dispatcher) = loaded_app();
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.radar.signals().limit().get(), 16);
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.radar.signals().limit().get(), 11);
        assert_eq!(dispatcher.pending(), 2);

        for _ in 0..20 {
            press(&mut app, KeyCode::Char(']'));
        }
        assert_eq!(app.radar.signals().limit().get(), 50);
        let pending = dispatcher.pending();
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(dispatcher.pending(), pending);
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Warning);
    }

    #[test]
    fn symbol_edit_stores_without_fetching() {
        let (mut app, dispatcher) = loaded_app();
        press(&mut app, KeyCode::Char('t'));
        type_str(&mut app, "amd, tsmq");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.radar.signals().symbols_input(), "amd, tsm");
        assert_eq!(dispatcher.pending(), 0);
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Warning);
        assert!(msg.contains("press r"));

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(dispatcher.pending(), 1);
        assert!(!app.radar.signals().symbols_pending());
    }

    #[test]
    fn esc_discards_symbol_draft() {
        let (mut app, _) = loaded_app();
        press(&mut app, KeyCode::Char('t'));
        type_str(&mut app, "spy");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.radar.signals().symbols_input(), "");
    }

    #[test]
    fn filter_keys_step_and_stay_ordered() {
        let (mut app, _) = loaded_app();
        press(&mut app, KeyCode::Char('S'));
        press(&mut app, KeyCode::Char('S'));
        assert_eq!(app.radar.criteria().min_score(), 10.0);

        for _ in 0..30 {
            press(&mut app, KeyCode::Char('N'));
        }
        assert_eq!(app.radar.criteria().rsi_min(), 100.0);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.radar.criteria().rsi_max(), 100.0);

        press(&mut app, KeyCode::Char('c'));
        assert!(app.radar.criteria().is_default());

        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Char('u'));
        assert!(app.radar.criteria().require_bullish());
        assert!(app.radar.criteria().require_uptrend());
        assert_eq!(app.ranked_rows().len(), 1);
    }

    #[test]
    fn enter_opens_chart_and_esc_closes() {
        let (mut app, dispatcher) = loaded_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.radar.history().state(),
            &ModalViewState::Loading("AAPL".into())
        );

        // Main screen keys are swallowed while the modal is open.
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert!(!app.radar.history().state().is_open());

        dispatcher.run_all();
        app.tick();
        assert_eq!(app.radar.history().state(), &ModalViewState::Closed);
    }

    #[test]
    fn overlays_open_and_close() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Char('z'));
        assert_eq!(app.overlay, Overlay::None);

        app.push_error(crate::app::ErrorCategory::Signals, "a".into(), String::new());
        app.push_error(crate::app::ErrorCategory::Signals, "b".into(), String::new());
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.error_scroll, 1);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
    }
}
