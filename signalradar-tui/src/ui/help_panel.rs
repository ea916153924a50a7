//! Keyboard shortcuts overlay.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 90, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [any key]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "List");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "+ / -", "Limit +1 / -1 (fetches)");
    key(&mut lines, "] / [", "Limit +5 / -5 (fetches)");
    key(&mut lines, "r", "Refresh with current limit and symbols");
    key(&mut lines, "t", "Edit custom symbols (saved, not fetched)");
    key(&mut lines, "Enter", "Open price chart for the selected row");
    lines.push(Line::from(""));

    section(&mut lines, "Filters (local, no fetch)");
    key(&mut lines, "s / S", "Min score -5 / +5");
    key(&mut lines, "n / N", "RSI min -5 / +5");
    key(&mut lines, "x / X", "RSI max -5 / +5");
    key(&mut lines, "b", "Require Bullish Momentum");
    key(&mut lines, "u", "Require Strong Uptrend");
    key(&mut lines, "c", "Clear all filters");
    lines.push(Line::from(""));

    section(&mut lines, "Chart");
    key(&mut lines, "r", "Reload history");
    key(&mut lines, "Esc / q", "Close");
    lines.push(Line::from(""));

    section(&mut lines, "General");
    key(&mut lines, "e", "Error history");
    key(&mut lines, "?", "This help");
    key(&mut lines, "q", "Quit");

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>10}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
