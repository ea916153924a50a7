//! Chart modal — daily closes for one ticker.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use signalradar_core::domain::{HistoryPoint, HistorySnapshot};
use signalradar_core::state::ModalViewState;

use crate::theme::{self, PALETTE};
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect, state: &ModalViewState, days: u32) {
    let popup = centered_rect(85, 75, area);
    f.render_widget(Clear, popup);

    let ticker = state.ticker().unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {ticker} · {days}d [Esc]close [r]reload "))
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    match state {
        ModalViewState::Loaded(_, history) if !history.is_empty() => {
            render_chart(f, inner, history)
        }
        ModalViewState::Loaded(..) => message(f, inner, "No history returned.", theme::muted()),
        ModalViewState::Loading(_) => message(f, inner, "Loading history...", theme::accent()),
        ModalViewState::Failed(_, msg) => message(f, inner, msg, theme::negative()),
        ModalViewState::Closed => {}
    }
}

fn message(f: &mut Frame, area: Rect, text: &str, style: Style) {
    let lines = vec![Line::from(""), Line::from(Span::styled(text.to_string(), style))];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, history: &HistorySnapshot) {
    let Some((lo, hi)) = history.close_range() else {
        return;
    };
    let padding = ((hi - lo).abs() * 0.05).max(0.01);
    let y_min = lo - padding;
    let y_max = hi + padding;
    let x_max = history.points.len().saturating_sub(1) as f64;

    let data: Vec<(f64, f64)> = history
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.close))
        .collect();

    let change = history.change_pct().unwrap_or(0.0);
    let color = PALETTE.change_color(change);
    let name = format!("{} {:+.2}%", history.ticker, change * 100.0);

    let dataset = Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(color))
        .graph_type(GraphType::Line)
        .data(&data);

    let date_label = |p: Option<&HistoryPoint>| {
        p.map(|p| p.date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(date_label(history.first()), theme::muted()),
                    Span::styled(date_label(history.last()), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Close", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{lo:.2}"), theme::muted()),
                    Span::styled(format!("{hi:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
