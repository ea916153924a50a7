//! Overlay widgets — symbols editor, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use signalradar_core::symbols::normalize_symbols;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Custom symbols editor. Saving stores the text; it is sent on the next
/// refresh or limit change.
pub fn render_symbols(f: &mut Frame, area: Rect, draft: &str) {
    let popup = centered_rect(60, 30, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Custom Symbols [Enter]save [Esc]cancel ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let parsed = normalize_symbols(draft);
    let preview = if parsed.is_empty() {
        Span::styled("default universe", theme::muted())
    } else {
        Span::styled(parsed.join(","), theme::neutral())
    };

    let text = vec![
        Line::from(Span::styled(
            "Comma or space separated, blank for the default universe:",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(draft, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("Will request: ", theme::muted()), preview]),
        Line::from(Span::styled(
            "Saving does not fetch; press r afterwards.",
            theme::warning(),
        )),
    ];

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().skip(app.error_scroll) {
        if lines.len() >= inner.height as usize {
            break;
        }
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
