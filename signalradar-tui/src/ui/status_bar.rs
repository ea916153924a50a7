//! Bottom status bar: key hints, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(" r:refresh t:symbols ?:help q:quit", theme::muted()));

    if !app.error_history.is_empty() {
        spans.push(Span::styled(
            format!(" e:errors({})", app.error_history.len()),
            theme::warning(),
        ));
    }

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
