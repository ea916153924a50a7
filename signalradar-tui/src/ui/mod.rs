//! Top-level UI layout: signals screen with status bar, overlays on top.

pub mod chart_modal;
pub mod help_panel;
pub mod overlays;
pub mod signals_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    f.render_widget(Block::default().style(theme::background()), f.area());

    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    signals_panel::render(f, main_area, app);
    status_bar::render(f, status_area, app);

    let history = app.radar.history();
    if history.state().is_open() {
        chart_modal::render(f, main_area, history.state(), history.days());
    }

    match &app.overlay {
        Overlay::Symbols(draft) => overlays::render_symbols(f, main_area, draft),
        Overlay::Help => help_panel::render(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
